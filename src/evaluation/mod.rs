mod classify;
mod confusion_matrix;
mod report;

pub use classify::{classify, confusion_matrix};
pub use confusion_matrix::ConfusionMatrix;
pub use report::{EvaluationReport, ReportFormat};
