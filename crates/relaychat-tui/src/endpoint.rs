//! Endpoint bootstrap.
//!
//! Turns the user-facing server URL into the WebSocket endpoint handed to
//! the client. Plain HTTP maps to `ws`, HTTPS to `wss`.

use thiserror::Error;
use url::Url;

/// Path of the relay's WebSocket handler.
pub const WEBSOCKET_PATH: &str = "/ws";

/// Errors converting a server URL.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointError {
    /// Not a URL.
    #[error("invalid server URL {url:?}: {reason}")]
    InvalidUrl {
        /// URL as given.
        url: String,
        /// Parse failure.
        reason: String,
    },

    /// Scheme has no WebSocket counterpart.
    #[error("unsupported scheme {0:?} (expected http, https, ws or wss)")]
    UnsupportedScheme(String),
}

/// WebSocket endpoint for the relay at `server`.
///
/// Query and fragment are discarded; the client appends its own query.
pub fn websocket_endpoint(server: &str) -> Result<String, EndpointError> {
    let mut url = Url::parse(server)
        .map_err(|e| EndpointError::InvalidUrl { url: server.to_owned(), reason: e.to_string() })?;

    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => return Err(EndpointError::UnsupportedScheme(other.to_owned())),
    };

    url.set_scheme(scheme).map_err(|()| EndpointError::UnsupportedScheme(scheme.to_owned()))?;
    url.set_path(WEBSOCKET_PATH);
    url.set_query(None);
    url.set_fragment(None);

    Ok(url.into())
}
