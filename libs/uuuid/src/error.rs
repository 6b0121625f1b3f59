//! Error types for identifier parsing and validation.

use thiserror::Error;

/// Errors that can occur when decoding identifiers or reading unbound slots.
///
/// A checksum mismatch is not an error: it is reported through
/// [`Uuuid::is_valid`](crate::Uuuid::is_valid).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The text does not have the hex or compact shape.
    #[error("malformed identifier: {message}")]
    MalformedInput { message: String },

    /// A slot was read before any construct or parse succeeded.
    #[error("identifier slot holds no fields yet")]
    UnboundState,

    /// The process-wide checksum salt was already installed or used.
    #[error("checksum salt is already installed")]
    SaltAlreadyInstalled,
}

impl IdError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        IdError::MalformedInput {
            message: message.into(),
        }
    }

    /// Returns true if the input could not be decoded.
    pub fn is_malformed(&self) -> bool {
        matches!(self, IdError::MalformedInput { .. })
    }

    /// Returns true if this error came from reading an empty slot.
    pub fn is_unbound(&self) -> bool {
        matches!(self, IdError::UnboundState)
    }
}
