use crate::classifiers::Classifier;
use crate::core::instances::Row;

/// Predicts each row's own label.
pub struct OracleClassifier {
    n_classes: usize,
}

impl OracleClassifier {
    pub fn new(n_classes: usize) -> Self {
        Self { n_classes }
    }
}

impl Classifier for OracleClassifier {
    fn predict(&self, row: &Row) -> Option<usize> {
        Some(row.label())
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }
}
