//! Diet engine errors
//!
//! Every failure here is a validation problem the caller can correct.

use thiserror::Error;

/// Validation error raised before any plan computation runs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DietError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be greater than zero (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("Unknown activity level '{0}' (expected sedentary, moderate or active)")]
    UnknownActivityLevel(String),
}

/// Result type for diet engine operations
pub type DietResult<T> = Result<T, DietError>;
