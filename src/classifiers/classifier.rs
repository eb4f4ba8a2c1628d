use crate::core::instances::Row;

pub trait Classifier {
    fn predict(&self, row: &Row) -> Option<usize>;
    fn n_classes(&self) -> usize;
}
