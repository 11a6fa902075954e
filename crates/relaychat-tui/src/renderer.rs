//! Terminal renderer.
//!
//! Implements [`Renderer`] by folding notifications into the [`ViewState`]
//! and redrawing the whole frame with ratatui.

use std::io;

use chrono::Local;
use ratatui::{Terminal, backend::Backend};
use relaychat_app::Renderer;
use relaychat_client::{Client, Environment, Notification};

use crate::{TerminalError, ViewState, ui};

/// Callback that applies a window title.
pub type TitleHook = Box<dyn FnMut(&str) -> io::Result<()> + Send>;

/// Renders client state to a ratatui terminal.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    view: ViewState,
    title_hook: Option<TitleHook>,
    applied_title: Option<String>,
}

impl<B: Backend> TerminalRenderer<B> {
    /// Renderer drawing to `terminal`.
    pub fn new(terminal: Terminal<B>) -> Self {
        Self { terminal, view: ViewState::new(), title_hook: None, applied_title: None }
    }

    /// Apply window titles through `hook` whenever they change.
    #[must_use]
    pub fn with_title_hook(mut self, hook: TitleHook) -> Self {
        self.title_hook = Some(hook);
        self
    }

    /// UI-local state.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Mutable UI-local state.
    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    /// Record a window focus change.
    pub fn set_focus(&mut self, focused: bool) {
        self.view.set_focus(focused);
    }

    /// Underlying terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Title most recently applied through the hook.
    pub fn applied_title(&self) -> Option<&str> {
        self.applied_title.as_deref()
    }

    fn draw<E: Environment>(&mut self, client: &Client<E>) -> Result<(), TerminalError> {
        let view = &self.view;
        self.terminal
            .draw(|frame| ui::render(frame, client, view, &Local))
            .map_err(|e| TerminalError::Draw(e.to_string()))?;

        let title = self.view.title(client.local_username());
        if self.applied_title.as_deref() != Some(title.as_str()) {
            if let Some(hook) = self.title_hook.as_mut() {
                hook(&title)?;
            }
            self.applied_title = Some(title);
        }

        Ok(())
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    type Error = TerminalError;

    fn render<E: Environment>(
        &mut self,
        notification: &Notification,
        client: &Client<E>,
    ) -> Result<(), Self::Error> {
        self.view.apply(notification);
        self.draw(client)
    }

    fn refresh<E: Environment>(&mut self, client: &Client<E>) -> Result<(), Self::Error> {
        self.draw(client)
    }
}
