//! Keyboard input driving a runtime end to end.

#![allow(clippy::unwrap_used)]

use std::{collections::VecDeque, convert::Infallible};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};
use relaychat_app::{Runtime, Transport};
use relaychat_client::{ClientConfig, SessionState, TransportEvent, test_utils::MockEnv};
use relaychat_proto::OutboundMessage;
use relaychat_tui::{
    Notice, TerminalRenderer,
    event_loop::{TerminalRuntime, handle_terminal_event},
};

#[derive(Default)]
struct LoopbackTransport {
    connected: bool,
    sent: Vec<OutboundMessage>,
    inbound: VecDeque<TransportEvent>,
}

impl Transport for LoopbackTransport {
    type Error = Infallible;

    fn connect(&mut self, _endpoint: &str, _username: &str) -> Result<(), Self::Error> {
        self.connected = true;
        self.inbound.push_back(TransportEvent::Opened);
        self.inbound.push_back(TransportEvent::Payload(
            r#"[{"username":"alice"},{"username":"bob"},{"username":"carol"}]"#.into(),
        ));
        Ok(())
    }

    async fn send(&mut self, message: OutboundMessage) -> Result<(), Self::Error> {
        self.sent.push(message);
        Ok(())
    }

    async fn close(&mut self) {
        self.inbound.push_back(TransportEvent::Closed { clean: true, reason: None });
    }

    async fn recv(&mut self) -> Option<TransportEvent> {
        let event = self.inbound.pop_front();
        if matches!(event, Some(TransportEvent::Closed { .. })) {
            self.connected = false;
        }
        event
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

type TestRuntime = TerminalRuntime<LoopbackTransport, TestBackend, MockEnv>;

fn runtime() -> TestRuntime {
    let terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
    Runtime::new(
        LoopbackTransport::default(),
        TerminalRenderer::new(terminal),
        MockEnv::new(),
        ClientConfig::new("ws://test/ws"),
    )
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

async fn type_line(runtime: &mut TestRuntime, text: &str) -> bool {
    for c in text.chars() {
        assert!(!handle_terminal_event(runtime, key(KeyCode::Char(c))).await.unwrap());
    }
    handle_terminal_event(runtime, key(KeyCode::Enter)).await.unwrap()
}

async fn log_in(runtime: &mut TestRuntime) {
    type_line(runtime, "alice").await;
    while runtime.pump().await.unwrap() {
        if runtime.client().online_peers().count() > 0 {
            break;
        }
    }
}

#[tokio::test]
async fn login_then_message_selected_peer() {
    let mut runtime = runtime();
    log_in(&mut runtime).await;
    assert_eq!(runtime.client().state(), SessionState::Active);

    handle_terminal_event(&mut runtime, key(KeyCode::Tab)).await.unwrap();
    assert_eq!(runtime.client().selected_peer(), Some("bob"));

    type_line(&mut runtime, "hello").await;

    assert_eq!(runtime.transport().sent, [OutboundMessage::direct("bob", "hello")]);
    assert!(runtime.renderer().view().input().buffer().is_empty());
}

#[tokio::test]
async fn up_wraps_to_last_peer() {
    let mut runtime = runtime();
    log_in(&mut runtime).await;

    handle_terminal_event(&mut runtime, key(KeyCode::Up)).await.unwrap();

    assert_eq!(runtime.client().selected_peer(), Some("carol"));
}

#[tokio::test]
async fn typing_without_selection_shows_hint() {
    let mut runtime = runtime();
    log_in(&mut runtime).await;

    handle_terminal_event(&mut runtime, key(KeyCode::Char('x'))).await.unwrap();

    assert!(matches!(runtime.renderer().view().notice(), Some(Notice::Info(_))));
    assert!(runtime.transport().sent.is_empty());
}

#[tokio::test]
async fn select_command_and_logout_command() {
    let mut runtime = runtime();
    log_in(&mut runtime).await;

    type_line(&mut runtime, "/select carol").await;
    assert_eq!(runtime.client().selected_peer(), Some("carol"));

    type_line(&mut runtime, "/logout").await;
    assert_eq!(runtime.client().state(), SessionState::Closing);
    assert_eq!(runtime.transport().sent, [OutboundMessage::logout("alice")]);

    while runtime.pump().await.unwrap() {}
    assert_eq!(runtime.client().state(), SessionState::LoggedOut);
}

#[tokio::test]
async fn blank_username_is_reported() {
    let mut runtime = runtime();

    type_line(&mut runtime, "   ").await;

    assert_eq!(runtime.client().state(), SessionState::LoggedOut);
    assert_eq!(runtime.renderer().view().notice(), Some(&Notice::error("Please enter a username")));
}

#[tokio::test]
async fn quit_keys() {
    let mut runtime = runtime();

    assert!(handle_terminal_event(&mut runtime, key(KeyCode::Esc)).await.unwrap());
    let interrupt = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(handle_terminal_event(&mut runtime, interrupt).await.unwrap());
}

#[tokio::test]
async fn focus_loss_and_gain() {
    let mut runtime = runtime();

    handle_terminal_event(&mut runtime, Event::FocusLost).await.unwrap();
    assert!(!runtime.renderer().view().is_focused());

    handle_terminal_event(&mut runtime, Event::FocusGained).await.unwrap();
    assert!(runtime.renderer().view().is_focused());
}
