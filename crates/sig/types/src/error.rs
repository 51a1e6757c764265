//! Error types for the foundation values.

use thiserror::Error;

/// Errors raised when constructing foundation values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypesError {
    /// A grade outside `[0, 1]` or not a number.
    #[error("invalid grade: {0} (expected a value in [0, 1])")]
    InvalidGrade(f64),

    /// A rectangle with negative or non-finite extent.
    #[error("invalid rectangle: {0}")]
    InvalidRect(String),

    /// A configuration value outside its admissible range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for foundation value construction.
pub type TypesResult<T> = Result<T, TypesError>;
