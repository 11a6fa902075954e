//! Peers sidebar
//!
//! Lists online peers with selection and unread indicators.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use relaychat_client::{Client, Environment};

use super::style::{avatar_color, sanitize};

const SELECTED_PREFIX: &str = ">";
const UNSELECTED_PREFIX: &str = " ";
const UNREAD_MARKER: &str = "*";
const EMPTY_MARKER: &str = "";

/// Render the peers sidebar.
pub fn render<E: Environment>(frame: &mut Frame, client: &Client<E>, area: Rect) {
    let items: Vec<ListItem> = client
        .online_peers()
        .map(|peer| {
            let selected = client.selected_peer() == Some(peer);
            let prefix = if selected { SELECTED_PREFIX } else { UNSELECTED_PREFIX };
            let marker = if client.is_unread(peer) { UNREAD_MARKER } else { EMPTY_MARKER };

            let mut name_style = Style::default().fg(avatar_color(peer));
            if selected {
                name_style = name_style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }

            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled(sanitize(peer), name_style),
                Span::styled(marker, Style::default().fg(Color::Red)),
            ]))
        })
        .collect();

    let items = if items.is_empty() {
        vec![ListItem::new(Span::styled("No one else online", Style::default().fg(Color::DarkGray)))]
    } else {
        items
    };

    let block = Block::default().borders(Borders::ALL).title(" Online ");
    frame.render_widget(List::new(items).block(block), area);
}
