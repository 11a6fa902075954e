//! Conversations and their message history.
//!
//! A conversation is the ordered history between the local user and exactly
//! one peer. Conversations are created lazily on first access and are never
//! deleted while a session is alive.

use std::{collections::HashMap, fmt};

use chrono::{DateTime, Utc};

/// Canonical identifier for a two-party conversation.
///
/// Built from both participants in lexicographic order, so both sides of a
/// conversation derive the same identifier. The participants are kept as
/// separate fields rather than a single joined string, so names containing
/// the separator cannot collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConversationId {
    low: String,
    high: String,
}

impl ConversationId {
    /// Identifier for the conversation between `a` and `b`.
    ///
    /// Symmetric: `new(a, b) == new(b, a)`.
    pub fn new(a: &str, b: &str) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self { low: low.to_owned(), high: high.to_owned() }
    }

    /// Both participants, lexicographically ordered.
    pub fn participants(&self) -> (&str, &str) {
        (&self.low, &self.high)
    }

    /// The participant that is not `username`, if `username` participates.
    pub fn other(&self, username: &str) -> Option<&str> {
        if self.low == username {
            Some(&self.high)
        } else if self.high == username {
            Some(&self.low)
        } else {
            None
        }
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Author of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sender {
    /// Authored by the local user.
    Local,
    /// Authored by the named peer.
    Peer(String),
}

impl Sender {
    /// Whether the local user authored the message.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local)
    }
}

/// One chat message. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Who wrote it.
    pub sender: Sender,
    /// Message text.
    pub content: String,
    /// Local wall-clock time at which the message was appended.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Message authored by the local user.
    pub fn local(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self { sender: Sender::Local, content: content.into(), timestamp }
    }

    /// Message received from `peer`.
    pub fn from_peer(
        peer: impl Into<String>,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self { sender: Sender::Peer(peer.into()), content: content.into(), timestamp }
    }
}

/// Ordered message history for one conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    id: ConversationId,
    messages: Vec<Message>,
}

impl Conversation {
    fn new(id: ConversationId) -> Self {
        Self { id, messages: Vec::new() }
    }

    /// Conversation identifier.
    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    /// Messages in append order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the conversation has no messages yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// All conversations of the current session, keyed by [`ConversationId`].
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    conversations: HashMap<ConversationId, Conversation>,
}

impl ConversationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Conversation for `id`, creating it empty if absent.
    ///
    /// Idempotent: an existing conversation keeps its messages.
    pub fn get_or_create(&mut self, id: ConversationId) -> &Conversation {
        self.conversations.entry(id).or_insert_with_key(|id| Conversation::new(id.clone()))
    }

    /// Conversation for `id`, if it has been created.
    pub fn get(&self, id: &ConversationId) -> Option<&Conversation> {
        self.conversations.get(id)
    }

    /// Append `message` to the conversation for `id`, creating it if absent.
    pub fn append_message(&mut self, id: ConversationId, message: Message) {
        self.conversations
            .entry(id)
            .or_insert_with_key(|id| Conversation::new(id.clone()))
            .messages
            .push(message);
    }

    /// Drop every conversation.
    pub fn reset_all(&mut self) {
        self.conversations.clear();
    }

    /// Number of conversations.
    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    /// Whether no conversation exists.
    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    /// Iterate over all conversations in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Conversation> {
        self.conversations.values()
    }
}
