//! Session controller.
//!
//! The `Client` owns the session lifecycle, routes classified server events
//! to the conversation store and presence tracker, and turns user intents
//! into transport actions.

use std::{collections::BTreeSet, fmt};

use relaychat_proto::{InboundEvent, OutboundMessage};

use crate::{
    conversation::{Conversation, ConversationId, ConversationStore, Message},
    env::Environment,
    error::ClientError,
    event::{ClientAction, ClientEvent, Notification},
    presence::PresenceTracker,
};

/// Session lifecycle.
///
/// ```text
/// LoggedOut --login--> Connecting --opened--> Active --logout--> Closing
///     ^                    |                    |                   |
///     +------closed--------+-------closed-------+-------closed------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// No session. Initial and terminal state.
    #[default]
    LoggedOut,
    /// Transport handshake in progress.
    Connecting,
    /// Transport open; messages flow.
    Active,
    /// Logout requested; waiting for the transport to close.
    Closing,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LoggedOut => "logged out",
            Self::Connecting => "connecting",
            Self::Active => "active",
            Self::Closing => "closing",
        };
        f.write_str(name)
    }
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server endpoint passed through to [`ClientAction::Connect`].
    pub endpoint: String,
}

impl ClientConfig {
    /// Configuration targeting `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }
}

/// Session controller for one RelayChat user.
pub struct Client<E: Environment> {
    /// Clock for message timestamps.
    env: E,

    /// Static configuration.
    config: ClientConfig,

    /// Lifecycle state.
    state: SessionState,

    /// Username presented during the handshake. Set only while connecting.
    pending_username: Option<String>,

    /// Username of the established session. Set only while active or closing.
    local_username: Option<String>,

    /// Per-peer message history.
    conversations: ConversationStore,

    /// Latest roster snapshot.
    presence: PresenceTracker,

    /// Peers with messages the user has not yet looked at.
    unread: BTreeSet<String>,

    /// Peer whose conversation is in focus.
    selected_peer: Option<String>,
}

impl<E: Environment> Client<E> {
    /// Create a logged-out client.
    pub fn new(env: E, config: ClientConfig) -> Self {
        Self {
            env,
            config,
            state: SessionState::LoggedOut,
            pending_username: None,
            local_username: None,
            conversations: ConversationStore::new(),
            presence: PresenceTracker::new(),
            unread: BTreeSet::new(),
            selected_peer: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Configured server endpoint.
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Username of the established session.
    pub fn local_username(&self) -> Option<&str> {
        self.local_username.as_deref()
    }

    /// Username of the login in progress.
    pub fn pending_username(&self) -> Option<&str> {
        self.pending_username.as_deref()
    }

    /// Peer whose conversation is in focus.
    pub fn selected_peer(&self) -> Option<&str> {
        self.selected_peer.as_deref()
    }

    /// Whether a message can be composed right now.
    pub fn can_compose(&self) -> bool {
        self.state == SessionState::Active && self.selected_peer.is_some()
    }

    /// Peers with unseen messages.
    pub fn unread(&self) -> &BTreeSet<String> {
        &self.unread
    }

    /// Whether `peer` has unseen messages.
    pub fn is_unread(&self, peer: &str) -> bool {
        self.unread.contains(peer)
    }

    /// All conversations of the session.
    pub fn conversations(&self) -> &ConversationStore {
        &self.conversations
    }

    /// Conversation with `peer`, if one has been created.
    pub fn conversation_with(&self, peer: &str) -> Option<&Conversation> {
        let local = self.local_username.as_deref()?;
        self.conversations.get(&ConversationId::new(local, peer))
    }

    /// Presence tracker holding the raw roster snapshot.
    pub fn presence(&self) -> &PresenceTracker {
        &self.presence
    }

    /// Online users other than the local user, in server order.
    pub fn online_peers(&self) -> impl Iterator<Item = &str> {
        let local = self.local_username.as_deref();
        self.presence.roster().iter().map(String::as_str).filter(move |peer| Some(*peer) != local)
    }

    /// Process an event and return resulting actions.
    pub fn handle(&mut self, event: ClientEvent) -> Result<Vec<ClientAction>, ClientError> {
        match event {
            ClientEvent::Login { username } => self.handle_login(&username),
            ClientEvent::TransportOpened => Ok(self.handle_transport_opened()),
            ClientEvent::TransportClosed { clean, reason } => {
                Ok(self.handle_transport_closed(clean, reason))
            },
            ClientEvent::PayloadReceived(text) => Ok(self.handle_payload(&text)),
            ClientEvent::SelectPeer { peer } => self.handle_select_peer(peer),
            ClientEvent::SendMessage { content } => self.handle_send_message(&content),
            ClientEvent::Logout => self.handle_logout(),
        }
    }

    fn handle_login(&mut self, username: &str) -> Result<Vec<ClientAction>, ClientError> {
        if self.state != SessionState::LoggedOut {
            return Err(ClientError::SessionAlreadyActive { state: self.state });
        }

        let username = username.trim();
        if username.is_empty() {
            return Err(ClientError::EmptyUsername);
        }

        tracing::info!(username, endpoint = %self.config.endpoint, "logging in");

        self.pending_username = Some(username.to_owned());
        self.state = SessionState::Connecting;

        Ok(vec![
            ClientAction::Connect {
                endpoint: self.config.endpoint.clone(),
                username: username.to_owned(),
            },
            ClientAction::Notify(Notification::SessionChanged { state: self.state }),
        ])
    }

    fn handle_transport_opened(&mut self) -> Vec<ClientAction> {
        if self.state != SessionState::Connecting {
            tracing::debug!(state = %self.state, "ignoring stale transport open");
            return Vec::new();
        }

        self.local_username = self.pending_username.take();
        self.state = SessionState::Active;

        tracing::info!(username = self.local_username.as_deref(), "session active");

        vec![ClientAction::Notify(Notification::SessionChanged { state: self.state })]
    }

    fn handle_transport_closed(&mut self, clean: bool, reason: Option<String>) -> Vec<ClientAction> {
        let previous = self.state;
        let attempted = self.pending_username.clone();

        match previous {
            SessionState::LoggedOut => {
                tracing::debug!("ignoring close without a session");
                return Vec::new();
            },
            SessionState::Connecting => {
                tracing::warn!(clean, reason = reason.as_deref(), "connection closed during login");
            },
            SessionState::Active | SessionState::Closing => {
                tracing::info!(clean, reason = reason.as_deref(), state = %previous, "session closed");
            },
        }

        self.reset();

        let mut actions =
            vec![ClientAction::Notify(Notification::SessionChanged { state: self.state })];

        // Unclean close before the session opened is read as a rejected
        // username. The server signals nothing more specific.
        if previous == SessionState::Connecting && !clean {
            let username = attempted.unwrap_or_default();
            actions.push(ClientAction::Notify(Notification::Error(ClientError::UsernameTaken {
                username,
                reason,
            })));
        }

        actions
    }

    fn handle_payload(&mut self, text: &str) -> Vec<ClientAction> {
        if self.state != SessionState::Active {
            tracing::debug!(state = %self.state, "dropping payload outside active session");
            return Vec::new();
        }

        match InboundEvent::decode(text) {
            Ok(InboundEvent::PresenceSnapshot { roster }) => self.apply_presence(roster),
            Ok(InboundEvent::LogoutNotice { username }) => self.apply_logout_notice(&username),
            Ok(InboundEvent::DirectMessage { from, content }) => {
                self.apply_direct_message(from, content)
            },
            Err(e) => {
                tracing::warn!(error = %e, "dropping malformed event");
                Vec::new()
            },
        }
    }

    fn apply_presence(&mut self, roster: Vec<String>) -> Vec<ClientAction> {
        tracing::debug!(online = roster.len(), "presence snapshot");

        self.presence.replace_roster(roster);
        let peers = self.online_peers().map(str::to_owned).collect();

        vec![ClientAction::Notify(Notification::RosterReplaced { peers })]
    }

    fn apply_logout_notice(&mut self, username: &str) -> Vec<ClientAction> {
        tracing::debug!(username, "peer logged out");

        let mut actions = Vec::new();

        if self.selected_peer.as_deref() == Some(username) {
            self.selected_peer = None;
            actions.push(ClientAction::Notify(Notification::SelectionChanged { peer: None }));
        }

        if self.unread.remove(username) {
            actions.push(self.unread_changed());
        }

        actions
    }

    fn apply_direct_message(&mut self, from: String, content: String) -> Vec<ClientAction> {
        let Some(local) = self.local_username.as_deref() else {
            return Vec::new();
        };

        if from == local {
            tracing::warn!(from = %from, "dropping message attributed to the local user");
            return Vec::new();
        }

        let conversation_id = ConversationId::new(local, &from);
        let message = Message::from_peer(from.clone(), content, self.env.now());
        self.conversations.append_message(conversation_id.clone(), message.clone());

        let mut actions = vec![ClientAction::Notify(Notification::MessageAppended {
            peer: from.clone(),
            conversation_id,
            message,
        })];

        if self.selected_peer.as_deref() != Some(from.as_str()) {
            if self.unread.insert(from.clone()) {
                actions.push(self.unread_changed());
            }
            actions.push(ClientAction::Notify(Notification::NewActivity { peer: from }));
        }

        actions
    }

    fn handle_select_peer(&mut self, peer: String) -> Result<Vec<ClientAction>, ClientError> {
        let local = self.active_username()?;

        if peer == local {
            return Err(ClientError::SelfConversation);
        }

        let conversation_id = ConversationId::new(local, &peer);
        self.conversations.get_or_create(conversation_id);

        let mut actions = Vec::new();

        if self.selected_peer.as_deref() != Some(peer.as_str()) {
            tracing::debug!(peer = %peer, "peer selected");
            self.selected_peer = Some(peer.clone());
            actions.push(ClientAction::Notify(Notification::SelectionChanged {
                peer: Some(peer.clone()),
            }));
        }

        if self.unread.remove(&peer) {
            actions.push(self.unread_changed());
        }

        Ok(actions)
    }

    fn handle_send_message(&mut self, content: &str) -> Result<Vec<ClientAction>, ClientError> {
        let local = self.active_username()?;

        let Some(peer) = self.selected_peer.as_deref() else {
            tracing::debug!("no peer selected, nothing sent");
            return Ok(Vec::new());
        };

        let content = content.trim();
        if content.is_empty() {
            return Ok(Vec::new());
        }

        let conversation_id = ConversationId::new(local, peer);
        let message = Message::local(content, self.env.now());
        let peer = peer.to_owned();

        self.conversations.append_message(conversation_id.clone(), message.clone());

        Ok(vec![
            ClientAction::Send(OutboundMessage::direct(peer.clone(), content)),
            ClientAction::Notify(Notification::MessageAppended { peer, conversation_id, message }),
        ])
    }

    fn handle_logout(&mut self) -> Result<Vec<ClientAction>, ClientError> {
        let local = self.active_username()?.to_owned();

        tracing::info!(username = %local, "logging out");

        self.state = SessionState::Closing;

        Ok(vec![
            ClientAction::Send(OutboundMessage::logout(local)),
            ClientAction::Close,
            ClientAction::Notify(Notification::SessionChanged { state: self.state }),
        ])
    }

    /// Local username, or `NotActive` outside an active session.
    fn active_username(&self) -> Result<&str, ClientError> {
        match (self.state, self.local_username.as_deref()) {
            (SessionState::Active, Some(local)) => Ok(local),
            _ => Err(ClientError::NotActive { state: self.state }),
        }
    }

    fn unread_changed(&self) -> ClientAction {
        ClientAction::Notify(Notification::UnreadChanged { unread: self.unread.clone() })
    }

    /// Discard all session state.
    fn reset(&mut self) {
        self.state = SessionState::LoggedOut;
        self.pending_username = None;
        self.local_username = None;
        self.conversations.reset_all();
        self.presence.clear();
        self.unread.clear();
        self.selected_peer = None;
    }
}
