//! Client-to-server messages.

use serde::{Deserialize, Serialize};

use crate::errors::{ProtocolError, Result};

/// Discriminator for logout notices. Serializes as the string `"logout"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogoutTag {
    /// `"logout"`
    #[serde(rename = "logout")]
    Logout,
}

/// `{"type": "logout", "username": ...}`
///
/// Sent by the client before closing a session, and relayed by the server to
/// every remaining peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutNotice {
    /// Always [`LogoutTag::Logout`].
    #[serde(rename = "type")]
    pub kind: LogoutTag,
    /// User who is leaving.
    pub username: String,
}

impl LogoutNotice {
    /// Logout notice for `username`.
    pub fn new(username: impl Into<String>) -> Self {
        Self { kind: LogoutTag::Logout, username: username.into() }
    }
}

/// `{"to": ..., "content": ...}`
///
/// The server fills in `from` before relaying, so the client never sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectMessage {
    /// Recipient username.
    pub to: String,
    /// Plain-text body.
    pub content: String,
}

/// Every message the client can put on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutboundMessage {
    /// Session is ending.
    Logout(LogoutNotice),
    /// Text for a single peer.
    Direct(DirectMessage),
}

impl OutboundMessage {
    /// Logout notice for `username`.
    pub fn logout(username: impl Into<String>) -> Self {
        Self::Logout(LogoutNotice::new(username))
    }

    /// Direct message to `to`.
    pub fn direct(to: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Direct(DirectMessage { to: to.into(), content: content.into() })
    }

    /// Encode as a JSON text payload.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ProtocolError::Encode(e.to_string()))
    }
}
