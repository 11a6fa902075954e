//! Client events, actions, and notifications.
//!
//! Events flow into the client, actions flow out. Notifications are the
//! subset of actions meant for the rendering layer.

use std::collections::BTreeSet;

use relaychat_proto::OutboundMessage;

use crate::{ConversationId, Message, SessionState, error::ClientError};

/// Events the client processes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// User asked to log in.
    Login {
        /// Requested username (surrounding whitespace is trimmed).
        username: String,
    },

    /// Transport finished its handshake.
    TransportOpened,

    /// Transport closed.
    TransportClosed {
        /// Whether the close was an orderly close handshake.
        clean: bool,
        /// Reason observed by the transport, if any.
        reason: Option<String>,
    },

    /// One text payload arrived from the server.
    PayloadReceived(String),

    /// User selected a peer to converse with.
    SelectPeer {
        /// Peer username.
        peer: String,
    },

    /// User submitted a message for the selected peer.
    SendMessage {
        /// Message text (surrounding whitespace is trimmed).
        content: String,
    },

    /// User asked to log out.
    Logout,
}

/// Actions the client produces for the caller to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    /// Open a transport to `endpoint` identifying as `username`.
    Connect {
        /// Server endpoint.
        endpoint: String,
        /// Username to present during the handshake.
        username: String,
    },

    /// Send a message over the open transport.
    Send(OutboundMessage),

    /// Initiate a graceful close of the transport.
    Close,

    /// Inform the rendering layer of a state change.
    Notify(Notification),
}

/// State changes the rendering layer should reflect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Session lifecycle moved to a new state.
    ///
    /// `LoggedOut` implies all session state was discarded.
    SessionChanged {
        /// New lifecycle state.
        state: SessionState,
    },

    /// Presence roster replaced. Excludes the local user.
    RosterReplaced {
        /// Online peers in server order.
        peers: Vec<String>,
    },

    /// A message was appended to a conversation.
    MessageAppended {
        /// The other participant.
        peer: String,
        /// Conversation the message belongs to.
        conversation_id: ConversationId,
        /// The appended message.
        message: Message,
    },

    /// Set of peers with unseen messages changed.
    UnreadChanged {
        /// Peers with unseen messages.
        unread: BTreeSet<String>,
    },

    /// Selected peer changed. `None` disables composition.
    SelectionChanged {
        /// Newly selected peer.
        peer: Option<String>,
    },

    /// A message arrived outside the selected conversation.
    NewActivity {
        /// Sender of the message.
        peer: String,
    },

    /// Non-fatal error to surface to the user.
    Error(ClientError),
}

/// Events produced by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Handshake completed.
    Opened,
    /// One text frame received.
    Payload(String),
    /// Connection closed. Always the last event of a connection.
    Closed {
        /// Whether the close was an orderly close handshake.
        clean: bool,
        /// Reason observed by the transport, if any.
        reason: Option<String>,
    },
}

impl From<TransportEvent> for ClientEvent {
    fn from(event: TransportEvent) -> Self {
        match event {
            TransportEvent::Opened => Self::TransportOpened,
            TransportEvent::Payload(text) => Self::PayloadReceived(text),
            TransportEvent::Closed { clean, reason } => Self::TransportClosed { clean, reason },
        }
    }
}
