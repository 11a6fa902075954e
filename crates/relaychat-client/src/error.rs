//! Client errors.

use relaychat_proto::ProtocolError;
use thiserror::Error;

use crate::SessionState;

/// Errors surfaced by the session engine.
///
/// None of these are fatal. Each resolves to a no-op, a prompt shown by the
/// rendering layer, or a full session reset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Login attempted with a blank username. Rejected before any network
    /// attempt.
    #[error("username must not be empty")]
    EmptyUsername,

    /// Connection closed uncleanly while logging in.
    ///
    /// Inferred from the close alone, so this may also be an unrelated
    /// handshake failure. `reason` carries whatever the transport observed.
    #[error("username {username:?} is already taken")]
    UsernameTaken {
        /// Username that was attempted.
        username: String,
        /// Transport-level close reason, if any.
        reason: Option<String>,
    },

    /// Login attempted while a session already exists.
    #[error("a session is already {state}")]
    SessionAlreadyActive {
        /// Lifecycle state at the time of the attempt.
        state: SessionState,
    },

    /// Operation requires an active session.
    #[error("no active session (currently {state})")]
    NotActive {
        /// Lifecycle state at the time of the attempt.
        state: SessionState,
    },

    /// Attempted to open a conversation with the local user.
    #[error("cannot open a conversation with yourself")]
    SelfConversation,

    /// Inbound payload could not be classified.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
