//! Login screen
//!
//! Username prompt, also shown while the handshake is in flight.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use relaychat_client::{Client, Environment};

use super::{centered, style::sanitize};
use crate::{Notice, Screen, ViewState};

const BOX_WIDTH: u16 = 44;
const BOX_HEIGHT: u16 = 7;
const PROMPT: &str = "> ";
const PROMPT_WIDTH: u16 = 2;
// Prompt row inside the box, below the hint and a blank line.
const PROMPT_ROW: u16 = 3;

/// Render the login box.
#[allow(clippy::cast_possible_truncation)]
pub fn render<E: Environment>(frame: &mut Frame, client: &Client<E>, view: &ViewState, area: Rect) {
    let connecting = Screen::of(client.state()) == Screen::Connecting;
    let area = centered(area, BOX_WIDTH, BOX_HEIGHT);

    let hint = if connecting {
        let name = client.pending_username().map(sanitize).unwrap_or_default();
        Line::from(Span::styled(format!("Connecting as {name}..."), Style::default().fg(Color::Yellow)))
    } else {
        Line::from(Span::raw("Enter a username to start chatting"))
    };

    let prompt = if connecting {
        Line::default()
    } else {
        Line::from(vec![
            Span::styled(PROMPT, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(view.input().buffer().to_owned()),
        ])
    };

    let notice = match view.notice() {
        Some(Notice::Error(text)) => Line::from(Span::styled(text.clone(), Style::default().fg(Color::Red))),
        Some(Notice::Info(text)) if !connecting => {
            Line::from(Span::styled(text.clone(), Style::default().fg(Color::DarkGray)))
        },
        _ => Line::default(),
    };

    let block = Block::default().borders(Borders::ALL).title(" RelayChat ");
    let paragraph = Paragraph::new(vec![hint, Line::default(), prompt, notice]).block(block);
    frame.render_widget(paragraph, area);

    if !connecting {
        let inner_width = area.width.saturating_sub(2);
        let offset = (view.input().cursor() as u16).min(inner_width.saturating_sub(PROMPT_WIDTH));
        let cursor_x = area.x.saturating_add(1).saturating_add(PROMPT_WIDTH).saturating_add(offset);
        let cursor_y = area.y.saturating_add(PROMPT_ROW);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}
