//! Inbound event classification.
//!
//! The server multiplexes three message kinds over one connection without an
//! envelope. Classification is structural:
//!
//! 1. A JSON array is a presence snapshot.
//! 2. An object whose `type` is `"logout"` is a logout notice.
//! 3. Any other object is a direct message.
//!
//! Required fields are checked while decoding the chosen shape. A payload
//! that fails is a [`ProtocolError::MalformedEvent`], never a guess at a
//! different shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    LogoutNotice,
    errors::{ProtocolError, Result},
};

/// Value of the `type` field on logout notices.
const LOGOUT_TYPE: &str = "logout";

/// One entry of a presence snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlineUser {
    /// Username as registered with the server (original case).
    pub username: String,
}

/// Relayed direct message as delivered by the server.
///
/// The server also echoes the `to` field; it is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundDirect {
    /// Sender username, filled in by the server.
    pub from: String,
    /// Plain-text body. Untrusted.
    pub content: String,
}

/// Typed server event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// Full list of currently online users, in server order.
    PresenceSnapshot {
        /// Online usernames.
        roster: Vec<String>,
    },

    /// A user ended their session.
    LogoutNotice {
        /// User who left.
        username: String,
    },

    /// Text relayed from another user.
    DirectMessage {
        /// Sender username.
        from: String,
        /// Plain-text body. Untrusted.
        content: String,
    },
}

impl InboundEvent {
    /// Decode a raw text payload and classify it.
    pub fn decode(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| ProtocolError::malformed(format!("invalid JSON: {e}")))?;
        Self::classify(value)
    }

    /// Classify an already-decoded payload.
    pub fn classify(value: Value) -> Result<Self> {
        let is_logout = value.get("type").and_then(Value::as_str) == Some(LOGOUT_TYPE);

        match value {
            Value::Array(_) => {
                let users: Vec<OnlineUser> = serde_json::from_value(value)
                    .map_err(|e| ProtocolError::malformed(format!("presence snapshot: {e}")))?;
                Ok(Self::PresenceSnapshot {
                    roster: users.into_iter().map(|u| u.username).collect(),
                })
            },
            Value::Object(_) if is_logout => {
                let notice: LogoutNotice = serde_json::from_value(value)
                    .map_err(|e| ProtocolError::malformed(format!("logout notice: {e}")))?;
                Ok(Self::LogoutNotice { username: notice.username })
            },
            Value::Object(_) => {
                let direct: InboundDirect = serde_json::from_value(value)
                    .map_err(|e| ProtocolError::malformed(format!("direct message: {e}")))?;
                Ok(Self::DirectMessage { from: direct.from, content: direct.content })
            },
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                Err(ProtocolError::malformed(format!("unexpected top-level {}", kind(&value))))
            },
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
