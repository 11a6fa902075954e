//! Terminal event loop.
//!
//! Drives the [`Runtime`] from two sources with `tokio::select!`: crossterm
//! terminal events and events from the live connection, if any.

use std::{io::stdout, time::Duration};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use relaychat_app::{Runtime, Transport};
use relaychat_client::{ClientConfig, Environment, SessionState, SystemEnv};

use crate::{
    KeyInput, Screen, TerminalError, TerminalRenderer, UiAction, WebSocketTransport,
    terminal::{self, TerminalGuard},
    view,
};

/// How long to wait for the server to acknowledge a logout on exit.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Runtime driving a terminal renderer.
pub type TerminalRuntime<T, B, E> = Runtime<T, TerminalRenderer<B>, E>;

/// Run the client until the user quits.
///
/// Logs in as `auto_login` right away when given.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn to.
pub async fn run(endpoint: String, auto_login: Option<String>) -> Result<(), TerminalError> {
    let _guard = TerminalGuard::enter()?;

    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    let renderer = TerminalRenderer::new(terminal).with_title_hook(Box::new(terminal::set_title));
    let mut runtime = Runtime::new(
        WebSocketTransport::new(),
        renderer,
        SystemEnv::new(),
        ClientConfig::new(endpoint),
    );

    runtime.refresh()?;
    if let Some(username) = auto_login {
        runtime.login(username).await?;
    }

    let mut events = EventStream::new();

    loop {
        let connected = runtime.is_connected();

        let should_quit = tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(event)) => handle_terminal_event(&mut runtime, event).await?,
                    Some(Err(e)) => return Err(TerminalError::Io(e)),
                    None => true,
                }
            }

            Some(event) = runtime.next_transport_event(), if connected => {
                runtime.handle_transport_event(event).await?;
                false
            }
        };

        if should_quit {
            break;
        }
    }

    shutdown(&mut runtime).await
}

/// Log out if a session is active and wait briefly for the close handshake.
async fn shutdown<T, B, E>(runtime: &mut TerminalRuntime<T, B, E>) -> Result<(), TerminalError>
where
    T: Transport,
    B: Backend,
    E: Environment,
{
    if runtime.client().state() != SessionState::Active {
        return Ok(());
    }

    runtime.logout().await?;

    let drain = async {
        while runtime.client().state() == SessionState::Closing && runtime.pump().await? {}
        Ok::<_, TerminalError>(())
    };

    match tokio::time::timeout(SHUTDOWN_GRACE, drain).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("server did not acknowledge logout in time");
            Ok(())
        },
    }
}

/// Handle one terminal event. Returns whether to quit.
///
/// # Errors
///
/// Returns an error if drawing fails.
pub async fn handle_terminal_event<T, B, E>(
    runtime: &mut TerminalRuntime<T, B, E>,
    event: Event,
) -> Result<bool, TerminalError>
where
    T: Transport,
    B: Backend,
    E: Environment,
{
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if is_interrupt(&key) {
                return Ok(true);
            }
            let Some(input) = convert_key(key.code) else {
                return Ok(false);
            };

            let screen = Screen::of(runtime.client().state());
            let can_compose = runtime.client().can_compose();
            let actions =
                runtime.renderer_mut().view_mut().input_mut().handle_key(input, screen, can_compose);

            apply_ui_actions(runtime, actions).await
        },
        Event::FocusGained => {
            runtime.renderer_mut().set_focus(true);
            runtime.refresh()?;
            Ok(false)
        },
        Event::FocusLost => {
            runtime.renderer_mut().set_focus(false);
            Ok(false)
        },
        Event::Resize(..) => {
            runtime.refresh()?;
            Ok(false)
        },
        _ => Ok(false),
    }
}

/// Carry out UI actions in order. Returns whether to quit.
///
/// # Errors
///
/// Returns an error if drawing fails.
pub async fn apply_ui_actions<T, B, E>(
    runtime: &mut TerminalRuntime<T, B, E>,
    actions: Vec<UiAction>,
) -> Result<bool, TerminalError>
where
    T: Transport,
    B: Backend,
    E: Environment,
{
    for action in actions {
        match action {
            UiAction::Redraw => runtime.refresh()?,
            UiAction::Login { username } => runtime.login(username).await?,
            UiAction::SelectPeer { peer } => runtime.select_peer(peer).await?,
            UiAction::CyclePeer(direction) => {
                if let Some(peer) = view::adjacent_peer(runtime.client(), direction) {
                    runtime.select_peer(peer).await?;
                }
            },
            UiAction::SendMessage { content } => runtime.send_message(content).await?,
            UiAction::Logout => runtime.logout().await?,
            UiAction::Notice(notice) => {
                runtime.renderer_mut().view_mut().set_notice(Some(notice));
                runtime.refresh()?;
            },
            UiAction::Quit => return Ok(true),
        }
    }
    Ok(false)
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Convert crossterm `KeyCode` to `KeyInput`.
fn convert_key(code: KeyCode) -> Option<KeyInput> {
    match code {
        KeyCode::Char(c) => Some(KeyInput::Char(c)),
        KeyCode::Enter => Some(KeyInput::Enter),
        KeyCode::Backspace => Some(KeyInput::Backspace),
        KeyCode::Delete => Some(KeyInput::Delete),
        KeyCode::Tab => Some(KeyInput::Tab),
        KeyCode::Esc => Some(KeyInput::Esc),
        KeyCode::Left => Some(KeyInput::Left),
        KeyCode::Right => Some(KeyInput::Right),
        KeyCode::Up => Some(KeyInput::Up),
        KeyCode::Down => Some(KeyInput::Down),
        KeyCode::Home => Some(KeyInput::Home),
        KeyCode::End => Some(KeyInput::End),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_c_interrupts() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(is_interrupt(&key));
        assert!(!is_interrupt(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
    }

    #[test]
    fn navigation_keys_convert() {
        assert_eq!(convert_key(KeyCode::Tab), Some(KeyInput::Tab));
        assert_eq!(convert_key(KeyCode::F(1)), None);
    }
}
