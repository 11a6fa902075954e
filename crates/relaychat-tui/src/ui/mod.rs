//! UI rendering
//!
//! Rendering functions that convert client and view state into terminal
//! output using ratatui widgets. All functions are pure (no I/O).

mod chat;
mod input;
mod login;
mod peers;
mod status;
pub mod style;

use std::fmt::Display;

use chrono::TimeZone;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};
use relaychat_client::{Client, Environment};

use crate::{Screen, ViewState};

/// Render the entire UI. Message times are shown in `zone`.
pub fn render<E, Tz>(frame: &mut Frame, client: &Client<E>, view: &ViewState, zone: &Tz)
where
    E: Environment,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const INPUT_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let area = frame.area();
    let screen = Screen::of(client.state());

    if matches!(screen, Screen::Login | Screen::Connecting) {
        login::render(frame, client, view, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    let [main_area, input_area, status_area] = chunks.as_ref() else {
        return;
    };

    render_main_area(frame, client, zone, *main_area);
    input::render(frame, client, view, *input_area);
    status::render(frame, client, view, *status_area);
}

/// Render the main area (peers sidebar + conversation).
fn render_main_area<E, Tz>(frame: &mut Frame, client: &Client<E>, zone: &Tz, area: Rect)
where
    E: Environment,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    const PEER_SIDEBAR_WIDTH: u16 = 20;
    const CHAT_AREA_MIN_WIDTH: u16 = 20;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(PEER_SIDEBAR_WIDTH), Constraint::Min(CHAT_AREA_MIN_WIDTH)])
        .split(area);

    let [peers_area, chat_area] = chunks.as_ref() else {
        return;
    };

    peers::render(frame, client, *peers_area);
    chat::render(frame, client, zone, *chat_area);
}

/// Rectangle of at most `width` x `height` centered in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x.saturating_add((area.width.saturating_sub(width)) / 2);
    let y = area.y.saturating_add((area.height.saturating_sub(height)) / 2);
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);

        assert_eq!(centered(area, 40, 8), Rect::new(20, 8, 40, 8));
        assert_eq!(centered(Rect::new(0, 0, 10, 4), 40, 8), Rect::new(0, 0, 10, 4));
    }
}
