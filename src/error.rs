use thiserror::Error;

/// Errors raised by tree construction and classification.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SprintError {
    #[error("dataset has no rows")]
    EmptyDataset,
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    #[error("cannot parse '{value}' at row {row}, column {column} as a number")]
    UnparsableField {
        row: usize,
        column: usize,
        value: String,
    },
    #[error("class label '{label}' at row {row} is outside [0, {n_classes})")]
    InvalidLabel {
        row: usize,
        label: String,
        n_classes: usize,
    },
    #[error("impurity threshold must be finite and >= 0, got {0}")]
    InvalidThreshold(f64),
}

pub type Result<T> = std::result::Result<T, SprintError>;
