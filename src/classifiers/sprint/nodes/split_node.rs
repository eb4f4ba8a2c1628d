use crate::classifiers::sprint::instance_conditional_test::{
    Branch, InstanceConditionalTest, SplitTest,
};
use crate::classifiers::sprint::nodes::NodeId;
use crate::core::instances::Row;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitNode {
    split_test: SplitTest,
    impurity: f64,
    observed_class_distribution: Vec<usize>,
    left: NodeId,
    right: NodeId,
}

impl SplitNode {
    pub fn new(
        split_test: SplitTest,
        impurity: f64,
        observed_class_distribution: Vec<usize>,
        left: NodeId,
        right: NodeId,
    ) -> Self {
        Self {
            split_test,
            impurity,
            observed_class_distribution,
            left,
            right,
        }
    }

    pub fn split_test(&self) -> &SplitTest {
        &self.split_test
    }

    pub fn impurity(&self) -> f64 {
        self.impurity
    }

    pub fn left(&self) -> NodeId {
        self.left
    }

    pub fn right(&self) -> NodeId {
        self.right
    }

    pub fn child(&self, branch: Branch) -> NodeId {
        match branch {
            Branch::Left => self.left,
            Branch::Right => self.right,
        }
    }

    pub fn child_for_row(&self, row: &Row) -> Option<NodeId> {
        self.split_test.branch_for_row(row).map(|b| self.child(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::sprint::instance_conditional_test::NumericAttributeBinaryTest;
    use crate::core::instances::Field;

    #[test]
    fn child_for_row_follows_the_test() {
        let node = SplitNode::new(
            SplitTest::Numeric(NumericAttributeBinaryTest::new(1, 3.5)),
            0.0,
            vec![2, 2],
            1,
            2,
        );
        let low = Row::new(0, vec![Field::Numeric(2.0)]);
        let high = Row::new(1, vec![Field::Numeric(5.0)]);
        assert_eq!(node.child_for_row(&low), Some(1));
        assert_eq!(node.child_for_row(&high), Some(2));
        assert_eq!(node.child(Branch::Right), 2);
    }

    #[test]
    fn child_for_row_is_none_without_a_value() {
        let node = SplitNode::new(
            SplitTest::Numeric(NumericAttributeBinaryTest::new(4, 3.5)),
            0.0,
            vec![1, 1],
            1,
            2,
        );
        assert_eq!(node.child_for_row(&Row::new(0, vec![Field::Numeric(2.0)])), None);
    }
}
