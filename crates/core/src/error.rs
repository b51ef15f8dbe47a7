//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// A user-supplied value was rejected.
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Item Name is required.")]
    EmptyName,

    #[error("Quantity must be a positive integer.")]
    InvalidQuantity,

    #[error("Price must be a non-negative decimal.")]
    InvalidPrice,
}

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// stale references). There is no infrastructure underneath the domain.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// User input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The referenced entity does not exist (or no longer exists).
    #[error("not found: {0}")]
    NotFound(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// The validation failure behind this error, if that is what it is.
    pub fn validation(&self) -> Option<ValidationError> {
        match self {
            DomainError::Validation(v) => Some(*v),
            _ => None,
        }
    }
}
