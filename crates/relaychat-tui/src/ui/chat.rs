//! Conversation pane
//!
//! Shows the history with the selected peer, newest at the bottom.

use std::fmt::Display;

use chrono::TimeZone;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use relaychat_client::{Client, Environment, Sender};

use super::style::{avatar_color, message_time, sanitize};

const BORDER_SIZE: u16 = 2;

/// Render the conversation pane.
pub fn render<E, Tz>(frame: &mut Frame, client: &Client<E>, zone: &Tz, area: Rect)
where
    E: Environment,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let title = client.selected_peer().map_or_else(|| " No conversation ".to_owned(), |peer| {
        format!(" {} ", sanitize(peer))
    });
    let block = Block::default().borders(Borders::ALL).title(title);

    let local = client.local_username().unwrap_or_default();

    let items: Vec<ListItem> = match client.selected_peer() {
        None => vec![ListItem::new(Line::from(Span::styled(
            "Select a peer to start chatting",
            Style::default().fg(Color::DarkGray),
        )))],
        Some(peer) => client
            .conversation_with(peer)
            .map(|conversation| conversation.messages())
            .unwrap_or_default()
            .iter()
            .map(|message| {
                let name = match &message.sender {
                    Sender::Local => local,
                    Sender::Peer(name) => name.as_str(),
                };
                let name_style =
                    Style::default().fg(avatar_color(name)).add_modifier(Modifier::BOLD);

                ListItem::new(Line::from(vec![
                    Span::styled(
                        message_time(message.timestamp, zone),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(" "),
                    Span::styled(format!("<{}>", sanitize(name)), name_style),
                    Span::raw(" "),
                    Span::raw(sanitize(&message.content)),
                ]))
            })
            .collect(),
    };

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let skip = items.len().saturating_sub(visible_height);
    let visible_items: Vec<_> = items.into_iter().skip(skip).collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
