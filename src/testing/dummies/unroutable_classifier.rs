use crate::classifiers::Classifier;
use crate::core::instances::Row;

/// Never reaches a leaf, whatever the row.
#[derive(Default)]
pub struct UnroutableClassifier {
    pub n_classes: usize,
}

impl Classifier for UnroutableClassifier {
    fn predict(&self, _row: &Row) -> Option<usize> {
        None
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }
}
