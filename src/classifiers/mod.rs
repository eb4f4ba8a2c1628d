mod classifier;
pub mod sprint;

pub use classifier::Classifier;
