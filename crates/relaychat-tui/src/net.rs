//! WebSocket transport for the runtime.

use relaychat_app::Transport;
use relaychat_client::{
    TransportEvent,
    transport::{self, ConnectedClient, TransportError},
};
use relaychat_proto::OutboundMessage;

/// [`Transport`] over a WebSocket connection to the relay.
///
/// Holds at most one connection. It is dropped after its closing event has
/// been delivered, so a new login starts from a clean slate.
#[derive(Default)]
pub struct WebSocketTransport {
    connection: Option<ConnectedClient>,
}

impl WebSocketTransport {
    /// Transport with no connection.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for WebSocketTransport {
    type Error = TransportError;

    fn connect(&mut self, endpoint: &str, username: &str) -> Result<(), Self::Error> {
        if let Some(previous) = self.connection.take() {
            tracing::warn!("replacing live connection");
            previous.stop();
        }
        self.connection = Some(transport::connect(endpoint, username)?);
        Ok(())
    }

    async fn send(&mut self, message: OutboundMessage) -> Result<(), Self::Error> {
        match &self.connection {
            Some(connection) => connection.send(&message).await,
            None => Err(TransportError::NotConnected),
        }
    }

    async fn close(&mut self) {
        if let Some(connection) = &self.connection {
            connection.close().await;
        }
    }

    async fn recv(&mut self) -> Option<TransportEvent> {
        let connection = self.connection.as_mut()?;

        // A task that vanished without reporting still ends the session.
        let event = connection
            .recv()
            .await
            .unwrap_or(TransportEvent::Closed { clean: false, reason: None });

        if matches!(event, TransportEvent::Closed { .. }) {
            self.connection = None;
        }
        Some(event)
    }

    fn is_connected(&self) -> bool {
        self.connection.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn idle_transport_has_nothing_to_receive() {
        let mut transport = WebSocketTransport::new();

        assert!(!transport.is_connected());
        assert_eq!(transport.recv().await, None);
        assert!(matches!(
            transport.send(OutboundMessage::logout("alice")).await,
            Err(TransportError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn malformed_endpoint_is_rejected_synchronously() {
        let mut transport = WebSocketTransport::new();

        assert!(transport.connect("not a url", "alice").is_err());
        assert!(!transport.is_connected());
    }

    #[tokio::test]
    async fn refused_connection_reports_closed_and_resets() {
        let mut transport = WebSocketTransport::new();

        // Port 9 (discard) is not listening on loopback in test environments.
        transport.connect("ws://127.0.0.1:9/ws", "alice").unwrap();
        assert!(transport.is_connected());

        let event = transport.recv().await;
        assert!(matches!(event, Some(TransportEvent::Closed { clean: false, .. })));
        assert!(!transport.is_connected());
    }
}
