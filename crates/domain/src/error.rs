//! Unified error types for the domain layer
//!
//! Provides a common error type for value-object construction, so adapters
//! can report malformed upstream data without resorting to String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Player id is not 32 hexadecimal characters once hyphens are removed
    #[error("Invalid player identity: {0}")]
    InvalidIdentity(String),

    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    /// Create an invalid identity error carrying the offending input.
    pub fn invalid_identity(input: impl Into<String>) -> Self {
        Self::InvalidIdentity(input.into())
    }

    /// Creates a validation error for value-object constraints.
    ///
    /// # Example
    /// ```ignore
    /// if profile_id.is_empty() {
    ///     return Err(DomainError::validation("Profile id cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Check if this is an identity error.
    pub fn is_invalid_identity(&self) -> bool {
        matches!(self, Self::InvalidIdentity(_))
    }
}
