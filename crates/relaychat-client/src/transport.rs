//! WebSocket transport for the client.
//!
//! Provides [`ConnectedClient`] which handles WebSocket I/O for the relay
//! protocol. This is a thin layer that just moves text frames; protocol
//! logic remains in the Sans-IO [`Client`](crate::Client).
//!
//! Connecting never blocks: the handshake runs on a background task and its
//! outcome arrives as the first [`TransportEvent`]. Every connection ends
//! with exactly one [`TransportEvent::Closed`].

use futures::{SinkExt, StreamExt};
use relaychat_proto::OutboundMessage;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, Message},
};
use url::Url;

use crate::TransportEvent;

/// Query parameter carrying the username during the handshake.
const USERNAME_PARAM: &str = "username";

/// Capacity of the outgoing command channel.
const COMMAND_CHANNEL_CAPACITY: usize = 32;

/// Capacity of the incoming event channel.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Endpoint is not a valid URL.
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint {
        /// Endpoint as given.
        endpoint: String,
        /// Parse failure.
        reason: String,
    },

    /// Connection task has stopped.
    #[error("not connected")]
    NotConnected,

    /// Outgoing message could not be encoded.
    #[error(transparent)]
    Encode(#[from] relaychat_proto::ProtocolError),
}

/// Commands from the handle to the connection task.
#[derive(Debug)]
enum Command {
    Send(String),
    Close,
}

/// Handle to a WebSocket connection.
///
/// Commands are sent through an internal channel and a background task
/// handles the WebSocket I/O.
pub struct ConnectedClient {
    /// Send commands to the connection task.
    to_server: mpsc::Sender<Command>,
    /// Receive events from the connection task.
    from_server: mpsc::Receiver<TransportEvent>,
    /// Abort handle to stop the connection task.
    abort_handle: tokio::task::AbortHandle,
}

impl ConnectedClient {
    /// Send one message as a text frame.
    pub async fn send(&self, message: &OutboundMessage) -> Result<(), TransportError> {
        let text = message.to_json()?;
        self.to_server.send(Command::Send(text)).await.map_err(|_| TransportError::NotConnected)
    }

    /// Begin the close handshake. The connection reports
    /// [`TransportEvent::Closed`] once the server acknowledges.
    pub async fn close(&self) {
        if self.to_server.send(Command::Close).await.is_err() {
            tracing::debug!("close requested on finished connection");
        }
    }

    /// Next event from the connection. `None` once the task has finished and
    /// all events were drained.
    pub async fn recv(&mut self) -> Option<TransportEvent> {
        self.from_server.recv().await
    }

    /// Whether the connection task is still running.
    pub fn is_running(&self) -> bool {
        !self.to_server.is_closed()
    }

    /// Stop the connection without a close handshake.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

impl Drop for ConnectedClient {
    fn drop(&mut self) {
        self.abort_handle.abort();
    }
}

/// Handshake URL for `endpoint` with `username` attached as a query
/// parameter.
pub fn connect_url(endpoint: &str, username: &str) -> Result<Url, TransportError> {
    let mut url = Url::parse(endpoint).map_err(|e| TransportError::InvalidEndpoint {
        endpoint: endpoint.to_owned(),
        reason: e.to_string(),
    })?;
    url.query_pairs_mut().append_pair(USERNAME_PARAM, username);
    Ok(url)
}

/// Connect to a relay server.
///
/// Must be called from within a Tokio runtime. Returns immediately; the
/// handshake outcome is reported as [`TransportEvent::Opened`] or
/// [`TransportEvent::Closed`].
pub fn connect(endpoint: &str, username: &str) -> Result<ConnectedClient, TransportError> {
    let url = connect_url(endpoint, username)?;

    let (to_server_tx, to_server_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
    let (from_server_tx, from_server_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

    let handle = tokio::spawn(run_connection(url, to_server_rx, from_server_tx));

    Ok(ConnectedClient {
        to_server: to_server_tx,
        from_server: from_server_rx,
        abort_handle: handle.abort_handle(),
    })
}

/// Run the connection, bridging between channels and the WebSocket.
async fn run_connection(
    url: Url,
    mut commands: mpsc::Receiver<Command>,
    events: mpsc::Sender<TransportEvent>,
) {
    tracing::debug!(url = %url, "connecting");

    let socket = match connect_async(url.as_str()).await {
        Ok((socket, _response)) => socket,
        Err(e) => {
            let reason = handshake_failure(&e);
            tracing::warn!(reason = %reason, "handshake failed");
            let _ = events.send(TransportEvent::Closed { clean: false, reason: Some(reason) }).await;
            return;
        },
    };

    if events.send(TransportEvent::Opened).await.is_err() {
        return;
    }

    let (mut sink, mut stream) = socket.split();
    let mut closing = false;

    let closed = loop {
        tokio::select! {
            command = commands.recv(), if !closing => match command {
                Some(Command::Send(text)) => {
                    if let Err(e) = sink.send(Message::Text(text)).await {
                        break unclean(format!("send failed: {e}"));
                    }
                },
                Some(Command::Close) | None => {
                    closing = true;
                    if let Err(e) = sink.send(Message::Close(None)).await {
                        break unclean(format!("close failed: {e}"));
                    }
                },
            },
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    if events.send(TransportEvent::Payload(text)).await.is_err() {
                        return;
                    }
                },
                Some(Ok(Message::Close(frame))) => {
                    let reason =
                        frame.map(|f| f.reason.into_owned()).filter(|reason| !reason.is_empty());
                    break TransportEvent::Closed { clean: true, reason };
                },
                Some(Ok(_)) => {},
                Some(Err(e)) => break unclean(e.to_string()),
                None => break unclean("connection ended without close frame".to_owned()),
            },
        }
    };

    // Flushes the close reply queued by tungstenite.
    let _ = sink.close().await;

    tracing::debug!(?closed, "connection finished");
    let _ = events.send(closed).await;
}

fn unclean(reason: String) -> TransportEvent {
    TransportEvent::Closed { clean: false, reason: Some(reason) }
}

/// Human-readable handshake failure, preferring the HTTP status when the
/// server refused the upgrade.
fn handshake_failure(error: &tungstenite::Error) -> String {
    match error {
        tungstenite::Error::Http(response) => {
            format!("server refused upgrade: HTTP {}", response.status())
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn username_is_query_encoded() {
        let url = connect_url("ws://localhost:8080/ws", "a b&c").unwrap();

        assert_eq!(url.as_str(), "ws://localhost:8080/ws?username=a+b%26c");
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let result = connect_url("not a url", "alice");

        assert!(matches!(result, Err(TransportError::InvalidEndpoint { .. })));
    }
}
