//! RelayChat wire protocol
//!
//! JSON message shapes exchanged with the presence-and-relay server, and the
//! classifier that turns an untyped inbound payload into a typed
//! [`InboundEvent`].
//!
//! # Wire shapes
//!
//! Inbound (server to client):
//! - `[{"username": "bob"}, ...]`: presence snapshot
//! - `{"type": "logout", "username": "bob"}`: logout notice
//! - `{"from": "bob", "content": "hi"}`: direct message (default case)
//!
//! Outbound (client to server):
//! - `{"type": "logout", "username": "alice"}`
//! - `{"to": "bob", "content": "hi"}`
//!
//! The protocol carries no framing of its own. Every payload is one text
//! message on the duplex connection.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod errors;
mod inbound;
mod outbound;

pub use errors::{ProtocolError, Result};
pub use inbound::{InboundDirect, InboundEvent, OnlineUser};
pub use outbound::{DirectMessage, LogoutNotice, LogoutTag, OutboundMessage};
