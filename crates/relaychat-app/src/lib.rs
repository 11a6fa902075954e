//! Application layer for RelayChat
//!
//! Generic runtime that wires the Sans-IO [`Client`](relaychat_client::Client)
//! to a transport and a rendering collaborator, so the same orchestration
//! runs in the terminal UI and in tests against fakes.
//!
//! # Components
//!
//! - [`Transport`]: Trait for the server connection
//! - [`Renderer`]: Trait for the presentation layer
//! - [`Runtime`]: Feeds events into the client and executes its actions

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod renderer;
mod runtime;
mod transport;

pub use renderer::Renderer;
pub use runtime::Runtime;
pub use transport::Transport;
