//! Input state and key handling for the TUI.
//!
//! This module owns all text input state (buffer, cursor) and handles
//! character-level key events. Submitted lines become [`UiAction`]s; command
//! parsing happens here on Enter.

use crate::{
    commands::{self, COMMAND_PREFIX, Command},
    view::{Notice, Screen},
};

/// Key input events from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Character input.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Tab key.
    Tab,
    /// Escape key.
    Esc,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
}

/// Direction for cycling through online peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerDirection {
    /// Next peer in roster order, wrapping.
    Next,
    /// Previous peer in roster order, wrapping.
    Previous,
}

/// What the event loop should do in response to a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Redraw without a state change.
    Redraw,
    /// Log in with the submitted name.
    Login {
        /// Username as typed.
        username: String,
    },
    /// Focus a named peer.
    SelectPeer {
        /// Peer username.
        peer: String,
    },
    /// Focus the adjacent online peer.
    CyclePeer(PeerDirection),
    /// Send a message to the selected peer.
    SendMessage {
        /// Message text as typed.
        content: String,
    },
    /// End the session.
    Logout,
    /// Show a notice in the status line.
    Notice(Notice),
    /// Exit the application.
    Quit,
}

/// Input state for the TUI.
///
/// Manages the text input buffer and cursor position. The cursor counts
/// characters, not bytes.
#[derive(Debug, Default)]
pub struct InputState {
    /// Text buffer for user input.
    buffer: String,
    /// Cursor position within the buffer, in characters.
    cursor: usize,
}

impl InputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text in the input buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Current cursor position, in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the buffer holds a command being typed.
    pub fn is_command(&self) -> bool {
        self.buffer.starts_with(COMMAND_PREFIX)
    }

    /// Discard the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Handle a key input event.
    ///
    /// `can_compose` gates message text on the chat screen: without a
    /// selected peer only commands can be typed.
    pub fn handle_key(&mut self, key: KeyInput, screen: Screen, can_compose: bool) -> Vec<UiAction> {
        if key == KeyInput::Esc {
            return vec![UiAction::Quit];
        }

        if !screen.accepts_input() {
            return vec![];
        }

        match key {
            KeyInput::Char(c) => self.handle_char(c, screen, can_compose),
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    self.cursor = self.cursor.saturating_sub(1);
                    let at = self.byte_index(self.cursor);
                    self.buffer.remove(at);
                }
                vec![UiAction::Redraw]
            },
            KeyInput::Delete => {
                if self.cursor < self.char_count() {
                    let at = self.byte_index(self.cursor);
                    self.buffer.remove(at);
                }
                vec![UiAction::Redraw]
            },
            KeyInput::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                vec![UiAction::Redraw]
            },
            KeyInput::Right => {
                if self.cursor < self.char_count() {
                    self.cursor = self.cursor.saturating_add(1);
                }
                vec![UiAction::Redraw]
            },
            KeyInput::Home => {
                self.cursor = 0;
                vec![UiAction::Redraw]
            },
            KeyInput::End => {
                self.cursor = self.char_count();
                vec![UiAction::Redraw]
            },
            KeyInput::Enter => self.handle_enter(screen, can_compose),
            KeyInput::Tab | KeyInput::Down if screen == Screen::Chat => {
                vec![UiAction::CyclePeer(PeerDirection::Next)]
            },
            KeyInput::Up if screen == Screen::Chat => {
                vec![UiAction::CyclePeer(PeerDirection::Previous)]
            },
            KeyInput::Tab | KeyInput::Up | KeyInput::Down | KeyInput::Esc => vec![],
        }
    }

    fn handle_char(&mut self, c: char, screen: Screen, can_compose: bool) -> Vec<UiAction> {
        let gated = screen == Screen::Chat
            && !can_compose
            && !self.is_command()
            && !(self.buffer.is_empty() && c == COMMAND_PREFIX);

        if gated {
            return vec![UiAction::Notice(Notice::info(
                "Select a peer with Tab or /select <peer> to start chatting",
            ))];
        }

        let at = self.byte_index(self.cursor);
        self.buffer.insert(at, c);
        self.cursor = self.cursor.saturating_add(1);
        vec![UiAction::Redraw]
    }

    /// Handle Enter key - submit the line for the current screen.
    fn handle_enter(&mut self, screen: Screen, can_compose: bool) -> Vec<UiAction> {
        let text = std::mem::take(&mut self.buffer);
        self.cursor = 0;

        if screen == Screen::Login {
            return vec![UiAction::Login { username: text }];
        }

        if text.trim().is_empty() {
            return vec![];
        }

        match commands::parse(&text) {
            Command::Select { peer } => vec![UiAction::SelectPeer { peer }],
            Command::Logout => vec![UiAction::Logout],
            Command::Quit => vec![UiAction::Quit],
            Command::Message { content } if can_compose => vec![UiAction::SendMessage { content }],
            Command::Message { content } => {
                // Nothing to send to; keep the text so it is not lost.
                self.cursor = content.chars().count();
                self.buffer = content;
                vec![UiAction::Notice(Notice::info("No peer selected"))]
            },
            Command::Unknown { input } => {
                vec![UiAction::Notice(Notice::error(format!("Unknown command: /{input}")))]
            },
            Command::MissingArgument { command, expected } => {
                vec![UiAction::Notice(Notice::error(format!("Usage: /{command} {expected}")))]
            },
        }
    }

    fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.buffer.char_indices().nth(cursor).map_or(self.buffer.len(), |(index, _)| index)
    }
}
