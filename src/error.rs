//! Error types for the picker core.

use thiserror::Error;

/// Errors raised while building a picker configuration.
///
/// Every variant is a precondition violation surfaced at construction time;
/// nothing in the core retries or recovers from these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PickerError {
    #[error("invalid configuration: divisions must be greater than zero")]
    ZeroDivisions,

    #[error("invalid configuration: maximum value {maximum} is below minimum value {minimum}")]
    InvertedRange { minimum: i64, maximum: i64 },

    #[error("invalid configuration: range {minimum}..={maximum} has too many ticks")]
    RangeTooLarge { minimum: i64, maximum: i64 },

    #[error("invalid configuration: {name} must be a positive length, got {value}")]
    InvalidLineSize { name: &'static str, value: f64 },

    #[error("invalid configuration: {name} must be a non-negative length, got {value}")]
    InvalidSpacing { name: &'static str, value: f64 },
}

/// Result type alias for [`PickerError`].
pub type Result<T> = std::result::Result<T, PickerError>;
