use thiserror::Error;

use crate::Type;

/// Errors raised while constructing typed values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    #[error("inconsistent element types: expected {expected}, found {found}")]
    InconsistentElementTypes { expected: Type, found: Type },

    #[error("{kind} must not be empty; use the typed empty constructor")]
    EmptyCollection { kind: &'static str },

    #[error("number must be finite, got {0}")]
    NonFiniteNumber(f64),

    #[error("invalid number literal {0:?}")]
    InvalidNumber(String),
}
