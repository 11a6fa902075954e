//! Presentation state owned by the terminal.
//!
//! Everything here is UI-local: the input line, the status notice, window
//! focus and the new-activity badge. Session state lives in the client and is
//! read at draw time.

use relaychat_client::{Client, ClientError, Environment, Notification, SessionState};

use crate::{InputState, PeerDirection};

/// Window title while no session is active.
pub const BASE_TITLE: &str = "Direct Chat";

/// Which screen to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Username prompt.
    Login,
    /// Waiting for the handshake.
    Connecting,
    /// Peers, conversation and composer.
    Chat,
    /// Waiting for the close handshake.
    Closing,
}

impl Screen {
    /// Screen shown for a session state.
    pub fn of(state: SessionState) -> Self {
        match state {
            SessionState::LoggedOut => Self::Login,
            SessionState::Connecting => Self::Connecting,
            SessionState::Active => Self::Chat,
            SessionState::Closing => Self::Closing,
        }
    }

    /// Whether keys other than Esc do anything on this screen.
    pub fn accepts_input(self) -> bool {
        matches!(self, Self::Login | Self::Chat)
    }
}

/// One-line status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Neutral information.
    Info(String),
    /// Something the user should act on.
    Error(String),
}

impl Notice {
    /// Informational notice.
    pub fn info(text: impl Into<String>) -> Self {
        Self::Info(text.into())
    }

    /// Error notice.
    pub fn error(text: impl Into<String>) -> Self {
        Self::Error(text.into())
    }
}

/// UI-local state.
#[derive(Debug)]
pub struct ViewState {
    input: InputState,
    notice: Option<Notice>,
    focused: bool,
    badge: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self { input: InputState::new(), notice: None, focused: true, badge: false }
    }
}

impl ViewState {
    /// Fresh state: empty input, focused window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Input line.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Mutable input line.
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Current status notice.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Replace the status notice.
    pub fn set_notice(&mut self, notice: Option<Notice>) {
        self.notice = notice;
    }

    /// Whether the terminal window has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether the new-activity badge is showing.
    pub fn has_badge(&self) -> bool {
        self.badge
    }

    /// Record a focus change. Gaining focus clears the badge.
    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
        if focused {
            self.badge = false;
        }
    }

    /// Fold one client notification into the view.
    pub fn apply(&mut self, notification: &Notification) {
        match notification {
            Notification::SessionChanged { state } => match state {
                SessionState::LoggedOut => {
                    self.input.clear();
                    self.notice = None;
                    self.badge = false;
                },
                SessionState::Connecting => self.notice = Some(Notice::info("Connecting...")),
                SessionState::Active => {
                    self.input.clear();
                    self.notice = None;
                },
                SessionState::Closing => self.notice = Some(Notice::info("Logging out...")),
            },
            Notification::SelectionChanged { peer: Some(_) } => {
                self.notice = None;
                self.badge = false;
            },
            Notification::SelectionChanged { peer: None } => {
                self.notice = Some(Notice::info("Peer logged out"));
            },
            Notification::NewActivity { .. } => {
                if !self.focused {
                    self.badge = true;
                }
            },
            Notification::Error(error) => self.show_error(error),
            Notification::RosterReplaced { .. }
            | Notification::MessageAppended { .. }
            | Notification::UnreadChanged { .. } => {},
        }
    }

    fn show_error(&mut self, error: &ClientError) {
        let text = match error {
            ClientError::UsernameTaken { .. } => {
                self.input.clear();
                "Username already taken - try another".to_owned()
            },
            ClientError::EmptyUsername => "Please enter a username".to_owned(),
            other => other.to_string(),
        };
        self.notice = Some(Notice::Error(text));
    }

    /// Window title for the session of `local`.
    pub fn title(&self, local: Option<&str>) -> String {
        match local {
            None => BASE_TITLE.to_owned(),
            Some(user) if self.badge => format!("(New) Chat - {user}"),
            Some(user) => format!("Chat - {user}"),
        }
    }
}

/// Online peer next to the selected one, wrapping around the roster.
///
/// With nothing selected, `Next` picks the first peer and `Previous` the last.
pub fn adjacent_peer<E: Environment>(client: &Client<E>, direction: PeerDirection) -> Option<String> {
    let peers: Vec<&str> = client.online_peers().collect();
    if peers.is_empty() {
        return None;
    }

    let last = peers.len().saturating_sub(1);
    let current = client.selected_peer().and_then(|selected| peers.iter().position(|p| *p == selected));

    let index = match (current, direction) {
        (None, PeerDirection::Next) => 0,
        (None, PeerDirection::Previous) => last,
        (Some(i), PeerDirection::Next) if i >= last => 0,
        (Some(i), PeerDirection::Next) => i.saturating_add(1),
        (Some(0), PeerDirection::Previous) => last,
        (Some(i), PeerDirection::Previous) => i.saturating_sub(1),
    };

    peers.get(index).map(|p| (*p).to_owned())
}
