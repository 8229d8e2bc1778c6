//! Intake error types.

use ec_accounting::AccountingError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntakeError {
    #[error("unknown dialogue topic: {0}")]
    UnknownTopic(String),

    #[error(transparent)]
    Validation(#[from] AccountingError),
}

impl IntakeError {
    /// Offending field path, when the error is about a profile field.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::UnknownTopic(_) => None,
            Self::Validation(e) => Some(e.field()),
        }
    }
}

/// Convenience alias for intake results.
pub type IntakeResult<T> = Result<T, IntakeError>;
