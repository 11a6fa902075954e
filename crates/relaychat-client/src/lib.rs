//! Client
//!
//! Action-based session engine for RelayChat. Keeps local conversation state
//! consistent with the server's event stream and the user's intents.
//!
//! # Architecture
//!
//! The client is Sans-IO. It receives events ([`ClientEvent`]), processes
//! them through pure state machine logic, and returns actions
//! ([`ClientAction`]) for the caller to execute: transport commands and
//! [`Notification`]s for the rendering layer.
//!
//! # Components
//!
//! - [`Client`]: Session controller (lifecycle, routing, user intents)
//! - [`ConversationStore`]: Per-peer message history
//! - [`PresenceTracker`]: Latest online roster
//! - [`Environment`]: Clock abstraction for deterministic tests
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides:
//! - [`transport::ConnectedClient`]: WebSocket connection handle
//! - [`transport::connect`]: Connect to a relay server

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod conversation;
mod env;
mod error;
mod event;
mod presence;

#[cfg(feature = "transport")]
pub mod transport;

pub use client::{Client, ClientConfig, SessionState};
pub use conversation::{Conversation, ConversationId, ConversationStore, Message, Sender};
pub use env::{Environment, SystemEnv};
#[cfg(any(test, feature = "test-utils"))]
pub use env::test_utils;
pub use error::ClientError;
pub use event::{ClientAction, ClientEvent, Notification, TransportEvent};
pub use presence::PresenceTracker;
pub use relaychat_proto::{InboundEvent, OutboundMessage, ProtocolError};
