//! Accounting error types.

use thiserror::Error;

/// Reasons an input is refused before any calculation runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccountingError {
    /// Missing or invalid required field.
    #[error("invalid `{field}`: {message}")]
    Validation { field: String, message: String },

    /// Input that would divide by zero or feed a negative quantity.
    #[error("arithmetic guard on `{field}`: {message}")]
    ArithmeticGuard { field: String, message: String },
}

impl AccountingError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn guard(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ArithmeticGuard {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Dot-separated path of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::Validation { field, .. } | Self::ArithmeticGuard { field, .. } => field,
        }
    }
}

/// Convenience alias for accounting results.
pub type AccountingResult<T> = Result<T, AccountingError>;
