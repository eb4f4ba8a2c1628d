use crate::error::{Result, SprintError};

/// Ascending cut points turning a numeric target into an ordinal class:
/// values below `cuts[0]` are class 0, below `cuts[1]` class 1, and so on.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelBins {
    cuts: Vec<f64>,
}

impl LabelBins {
    pub fn new(cuts: Vec<f64>) -> Result<Self> {
        if cuts.iter().any(|c| !c.is_finite()) {
            return Err(SprintError::InvalidSchema(
                "label bin cut points must be finite".to_string(),
            ));
        }
        if cuts.windows(2).any(|w| w[0] >= w[1]) {
            return Err(SprintError::InvalidSchema(format!(
                "label bin cut points must be strictly ascending: {cuts:?}"
            )));
        }
        Ok(Self { cuts })
    }

    pub fn n_classes(&self) -> usize {
        self.cuts.len() + 1
    }

    pub fn class_of(&self, value: f64) -> usize {
        self.cuts.partition_point(|&cut| cut <= value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abalone_rings_fall_into_three_classes() {
        let bins = LabelBins::new(vec![9.0, 15.0]).unwrap();
        assert_eq!(bins.n_classes(), 3);
        assert_eq!(bins.class_of(1.0), 0);
        assert_eq!(bins.class_of(8.0), 0);
        assert_eq!(bins.class_of(9.0), 1);
        assert_eq!(bins.class_of(14.0), 1);
        assert_eq!(bins.class_of(15.0), 2);
        assert_eq!(bins.class_of(29.0), 2);
    }

    #[test]
    fn unordered_or_non_finite_cuts_are_rejected() {
        assert!(LabelBins::new(vec![15.0, 9.0]).is_err());
        assert!(LabelBins::new(vec![9.0, 9.0]).is_err());
        assert!(LabelBins::new(vec![f64::NAN]).is_err());
    }

    #[test]
    fn no_cuts_means_a_single_class() {
        let bins = LabelBins::new(Vec::new()).unwrap();
        assert_eq!(bins.n_classes(), 1);
        assert_eq!(bins.class_of(-3.0), 0);
    }
}
