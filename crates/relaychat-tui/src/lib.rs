//! Terminal UI for RelayChat
//!
//! A thin shell over [`relaychat_app::Runtime`] that provides terminal
//! rendering, keyboard input, and the WebSocket transport. All session logic
//! lives in [`relaychat_client::Client`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod commands;
pub mod endpoint;
pub mod event_loop;
pub mod input;
pub mod logging;
pub mod net;
pub mod renderer;
pub mod terminal;
pub mod ui;
pub mod view;

pub use input::{InputState, KeyInput, PeerDirection, UiAction};
pub use net::WebSocketTransport;
pub use renderer::TerminalRenderer;
pub use terminal::TerminalError;
pub use view::{Notice, Screen, ViewState};
