use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("Unknown relation: {0}")]
    UnknownRelation(String),
    #[error("Unknown problem sense: {0} (expected min or max)")]
    UnknownSense(String),
    #[error("Line {line}: {message}")]
    Text { line: usize, message: String },
    #[error("Empty {0}")]
    Empty(&'static str),
    #[error("Constraint {constraint} has {found} coefficients, expected {expected}")]
    Dimension {
        constraint: usize,
        expected: usize,
        found: usize,
    },
}
