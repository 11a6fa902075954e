//! Screen rendering against ratatui's test backend.

#![allow(clippy::unwrap_used)]

use chrono::Utc;
use ratatui::{Terminal, backend::TestBackend};
use relaychat_app::Renderer;
use relaychat_client::{
    Client, ClientConfig, ClientError, ClientEvent, Notification, test_utils::MockEnv,
};
use relaychat_tui::{KeyInput, Notice, Screen, TerminalRenderer, ViewState, ui};

const WIDTH: u16 = 80;
const HEIGHT: u16 = 20;

fn rows(backend: &TestBackend) -> Vec<String> {
    let buffer = backend.buffer();
    (0..buffer.area.height)
        .map(|y| (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect())
        .collect()
}

fn contains(backend: &TestBackend, needle: &str) -> bool {
    rows(backend).iter().any(|row| row.contains(needle))
}

fn client() -> Client<MockEnv> {
    Client::new(MockEnv::new(), ClientConfig::new("ws://test/ws"))
}

fn active(username: &str, roster: &[&str]) -> Client<MockEnv> {
    let mut client = client();
    client.handle(ClientEvent::Login { username: username.into() }).unwrap();
    client.handle(ClientEvent::TransportOpened).unwrap();

    let entries: Vec<String> =
        roster.iter().map(|name| format!(r#"{{"username":"{name}"}}"#)).collect();
    let snapshot = format!("[{}]", entries.join(","));
    client.handle(ClientEvent::PayloadReceived(snapshot)).unwrap();
    client
}

fn draw(client: &Client<MockEnv>, view: &ViewState) -> Terminal<TestBackend> {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    terminal.draw(|frame| ui::render(frame, client, view, &Utc)).unwrap();
    terminal
}

#[test]
fn login_screen_prompts_for_username() {
    let client = client();
    let mut view = ViewState::new();
    for c in "ali".chars() {
        view.input_mut().handle_key(KeyInput::Char(c), Screen::Login, false);
    }

    let terminal = draw(&client, &view);

    assert!(contains(terminal.backend(), "RelayChat"));
    assert!(contains(terminal.backend(), "Enter a username"));
    assert!(contains(terminal.backend(), "> ali"));
}

#[test]
fn connecting_shows_pending_username() {
    let mut client = client();
    client.handle(ClientEvent::Login { username: "alice".into() }).unwrap();

    let terminal = draw(&client, &ViewState::new());

    assert!(contains(terminal.backend(), "Connecting as alice..."));
}

#[test]
fn username_taken_returns_to_prompt() {
    let mut client = client();
    client.handle(ClientEvent::Login { username: "bob".into() }).unwrap();
    client.handle(ClientEvent::TransportClosed { clean: false, reason: None }).unwrap();

    let mut view = ViewState::new();
    view.apply(&Notification::Error(ClientError::UsernameTaken {
        username: "bob".into(),
        reason: None,
    }));

    let terminal = draw(&client, &view);

    assert!(contains(terminal.backend(), "Enter a username"));
    assert!(contains(terminal.backend(), "Username already taken - try another"));
}

#[test]
fn chat_shows_peers_and_history() {
    let mut client = active("alice", &["alice", "bob", "carol"]);
    client.handle(ClientEvent::SelectPeer { peer: "bob".into() }).unwrap();
    client.handle(ClientEvent::SendMessage { content: "hi bob".into() }).unwrap();
    client.handle(ClientEvent::PayloadReceived(r#"{"from":"bob","content":"hey"}"#.into())).unwrap();
    client
        .handle(ClientEvent::PayloadReceived(r#"{"from":"carol","content":"psst"}"#.into()))
        .unwrap();

    let terminal = draw(&client, &ViewState::new());
    let backend = terminal.backend();

    assert!(contains(backend, " Online "));
    assert!(contains(backend, ">bob"));
    assert!(contains(backend, " carol*"));
    // Sidebar excludes the local user; the main area sits above input and status.
    let main_rows = rows(backend).into_iter().take(usize::from(HEIGHT - 4));
    let sidebar: Vec<String> = main_rows.map(|row| row.chars().take(20).collect()).collect();
    assert!(!sidebar.iter().any(|row| row.contains("alice")));
    assert!(contains(backend, "<alice> hi bob"));
    assert!(contains(backend, "<bob> hey"));
    assert!(!contains(backend, "psst"));
    assert!(contains(backend, "Online as alice"));
}

#[test]
fn message_times_follow_the_clock() {
    let mut client = active("alice", &["alice", "bob"]);
    client.handle(ClientEvent::SelectPeer { peer: "bob".into() }).unwrap();
    client.handle(ClientEvent::SendMessage { content: "ping".into() }).unwrap();

    let terminal = draw(&client, &ViewState::new());

    assert!(contains(terminal.backend(), "12:00 <alice> ping"));
}

#[test]
fn chat_without_selection_shows_placeholder() {
    let client = active("alice", &["alice", "bob"]);

    let terminal = draw(&client, &ViewState::new());

    assert!(contains(terminal.backend(), "Select a peer to start chatting"));
    assert!(contains(terminal.backend(), "Select a peer to send messages"));
}

#[test]
fn control_characters_are_not_drawn() {
    let mut client = active("alice", &["alice", "bob"]);
    client.handle(ClientEvent::SelectPeer { peer: "bob".into() }).unwrap();
    client
        .handle(ClientEvent::PayloadReceived(
            r#"{"from":"bob","content":"a\u001b[2Jb\nc"}"#.into(),
        ))
        .unwrap();

    let terminal = draw(&client, &ViewState::new());

    assert!(contains(terminal.backend(), "a\u{fffd}[2Jb c"));
}

#[test]
fn status_bar_shows_notice() {
    let client = active("alice", &["alice"]);
    let mut view = ViewState::new();
    view.set_notice(Some(Notice::error("Unknown command: /dance")));

    let terminal = draw(&client, &view);

    assert!(contains(terminal.backend(), "No one else online"));
    assert!(contains(terminal.backend(), "| Unknown command: /dance"));
}

#[test]
fn renderer_applies_titles_once_per_change() {
    use std::sync::{Arc, Mutex};

    let titles = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&titles);
    let terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    let mut renderer = TerminalRenderer::new(terminal).with_title_hook(Box::new(move |title: &str| {
        sink.lock().unwrap().push(title.to_owned());
        Ok(())
    }));

    let logged_out = client();
    renderer.refresh(&logged_out).unwrap();
    renderer.refresh(&logged_out).unwrap();

    let client = active("alice", &["alice", "bob"]);
    renderer.set_focus(false);
    renderer.render(&Notification::NewActivity { peer: "bob".into() }, &client).unwrap();
    renderer.set_focus(true);
    renderer.refresh(&client).unwrap();

    assert_eq!(*titles.lock().unwrap(), ["Direct Chat", "(New) Chat - alice", "Chat - alice"]);
    assert_eq!(renderer.applied_title(), Some("Chat - alice"));
}
