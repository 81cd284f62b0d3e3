use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Division by zero: {0}")]
    DivisionByZero(String),
}

pub type ProfileResult<T> = Result<T, ProfileError>;
