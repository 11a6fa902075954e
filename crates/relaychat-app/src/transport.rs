//! Transport trait for abstracting the server connection.
//!
//! The [`Transport`] trait decouples the runtime from a specific network
//! stack. The terminal frontend implements it over WebSocket; tests use an
//! in-memory fake.

use std::future::Future;

use relaychat_client::TransportEvent;
use relaychat_proto::OutboundMessage;

/// Abstracts the connection to the relay server.
///
/// At most one connection is live at a time. Its lifecycle is reported
/// through [`recv`](Transport::recv): [`TransportEvent::Opened`] or an early
/// [`TransportEvent::Closed`] first, then payloads, then exactly one
/// `Closed`.
pub trait Transport: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Begin connecting to `endpoint` as `username`.
    ///
    /// Does not wait for the handshake; its outcome arrives through
    /// [`recv`](Transport::recv).
    ///
    /// # Errors
    ///
    /// Returns an error if the attempt cannot even be started, for example
    /// because the endpoint is malformed.
    fn connect(&mut self, endpoint: &str, username: &str) -> Result<(), Self::Error>;

    /// Send one message to the server.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no open connection or the send fails.
    fn send(
        &mut self,
        message: OutboundMessage,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Begin a graceful close of the current connection.
    fn close(&mut self) -> impl Future<Output = ()> + Send;

    /// Next event from the current connection.
    ///
    /// Returns `None` if there is no connection to receive from.
    fn recv(&mut self) -> impl Future<Output = Option<TransportEvent>> + Send;

    /// Whether a connection is live (connecting, open, or closing).
    fn is_connected(&self) -> bool;
}
