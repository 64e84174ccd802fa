//! Error taxonomy for the simulator core.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Index or qubit position outside its valid bounds.
    #[error("Range Error: {0}")]
    Range(String),
    /// Malformed binary string or gate text.
    #[error("Format Error: {0}")]
    Format(String),
    #[error("Invalid Argument: {0}")]
    InvalidArgument(String),
    /// Incomplete or malformed function table.
    #[error("Validation Error: {0}")]
    Validation(String),
    #[error("Shape Mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },
    #[error("Not Unitary: {0}")]
    NotUnitary(String),
    #[error("Not Normalized: {0}")]
    NotNormalized(String),
}

impl SimError {
    pub fn range(message: impl Into<String>) -> Self { SimError::Range(message.into()) }
    pub fn format(message: impl Into<String>) -> Self { SimError::Format(message.into()) }
    pub fn invalid_argument(message: impl Into<String>) -> Self { SimError::InvalidArgument(message.into()) }
    pub fn validation(message: impl Into<String>) -> Self { SimError::Validation(message.into()) }

    /// Shape mismatch between two `rows×cols` shapes.
    pub fn shape(expected: (usize, usize), actual: (usize, usize)) -> Self {
        SimError::ShapeMismatch {
            expected: format!("{}x{}", expected.0, expected.1),
            actual: format!("{}x{}", actual.0, actual.1),
        }
    }

    /// Shape mismatch between two vector lengths.
    pub fn length(expected: usize, actual: usize) -> Self {
        SimError::ShapeMismatch { expected: format!("len {expected}"), actual: format!("len {actual}") }
    }
}
