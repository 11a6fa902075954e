//! Status bar
//!
//! Session state, identity and the current notice.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use relaychat_client::{Client, Environment, SessionState};

use super::style::sanitize;
use crate::{Notice, ViewState};

/// Render the status bar.
pub fn render<E: Environment>(frame: &mut Frame, client: &Client<E>, view: &ViewState, area: Rect) {
    let session = match client.state() {
        SessionState::LoggedOut => Span::styled("Logged out", Style::default().fg(Color::Red)),
        SessionState::Connecting => Span::styled("Connecting...", Style::default().fg(Color::Yellow)),
        SessionState::Active => Span::styled(
            format!("Online as {}", sanitize(client.local_username().unwrap_or_default())),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        SessionState::Closing => Span::styled("Logging out...", Style::default().fg(Color::Yellow)),
    };

    let notice = match view.notice() {
        Some(Notice::Info(text)) => Span::raw(format!(" | {text}")),
        Some(Notice::Error(text)) => Span::styled(
            format!(" | {text}"),
            Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
        ),
        None => Span::raw(""),
    };

    let status_line = Line::from(vec![Span::raw(" "), session, notice]);
    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
