use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafNode {
    predicted_class: usize,
    observed_class_distribution: Vec<usize>,
}

impl LeafNode {
/// Majority class; ties go to the lowest class index.
    pub fn from_class_counts(class_counts: Vec<usize>) -> Self {
        let mut predicted_class = 0;
        let mut best_count = 0;
        for (class, &count) in class_counts.iter().enumerate() {
            if count > best_count {
                best_count = count;
                predicted_class = class;
            }
        }
        Self {
            predicted_class,
            observed_class_distribution: class_counts,
        }
    }

    pub fn predicted_class(&self) -> usize {
        self.predicted_class
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_most_frequent_class() {
        let leaf = LeafNode::from_class_counts(vec![1, 4, 2]);
        assert_eq!(leaf.predicted_class(), 1);
    }

    #[test]
    fn ties_go_to_lowest_class_index() {
        assert_eq!(LeafNode::from_class_counts(vec![0, 3, 3]).predicted_class(), 1);
        assert_eq!(LeafNode::from_class_counts(vec![2, 2, 2]).predicted_class(), 0);
    }

    #[test]
    fn empty_distribution_predicts_class_zero() {
        assert_eq!(LeafNode::from_class_counts(vec![0, 0]).predicted_class(), 0);
    }
}
