//! Protocol errors.

use thiserror::Error;

/// Result alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors raised while decoding or encoding wire payloads.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Inbound payload did not match any known shape.
    ///
    /// Structural only: the payload was not JSON, had the wrong top-level
    /// type, or was missing a required field.
    #[error("malformed event: {reason}")]
    MalformedEvent {
        /// What was wrong with the payload.
        reason: String,
    },

    /// Outbound message could not be serialized.
    #[error("encode failed: {0}")]
    Encode(String),
}

impl ProtocolError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedEvent { reason: reason.into() }
    }
}
