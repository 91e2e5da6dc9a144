//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic domain failures. Remote-service failures
/// belong to the AI crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. missing item name, malformed date).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A conflict occurred (e.g. an id that is already taken).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// The message shown to a user, without the category prefix.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::InvalidId(msg) | Self::Conflict(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_category() {
        let err = DomainError::validation("name cannot be empty");
        assert_eq!(err.to_string(), "validation failed: name cannot be empty");
        let err = DomainError::invalid_id("ItemId: bad");
        assert_eq!(err.to_string(), "invalid identifier: ItemId: bad");
    }

    #[test]
    fn user_message_strips_category() {
        let err = DomainError::conflict("item already exists");
        assert_eq!(err.user_message(), "item already exists");
        assert_eq!(DomainError::invalid_id("ItemId: bad").user_message(), "ItemId: bad");
        assert_eq!(DomainError::validation("Name is required").user_message(), "Name is required");
    }
}
