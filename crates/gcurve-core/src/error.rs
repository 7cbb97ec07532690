use thiserror::Error;

#[derive(Debug, Error)]
pub enum CurveError {
    #[error("Invalid spline: {0}")]
    InvalidSpline(String),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, CurveError>;
