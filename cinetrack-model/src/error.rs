use thiserror::Error;

/// Validation failures raised by model constructors and mutators.
///
/// A failed validation never mutates the value it was aimed at; callers are
/// expected to report the error and re-prompt.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("{field} must be positive, got {value}")]
    InvalidId { field: &'static str, value: i32 },

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("{field} cannot exceed {max} characters")]
    FieldTooLong { field: &'static str, max: usize },

    #[error("progress must be between 0 and 100, got {0}")]
    PercentOutOfRange(u8),

    #[error("rating must be between 1.0 and 5.0, got {0:.1}")]
    RatingOutOfRange(f64),

    #[error("runtime cannot be negative, got {0}")]
    NegativeRuntime(i32),

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("unknown tracking status: {0}")]
    UnknownStatus(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
