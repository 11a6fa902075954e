//! Generic runtime for application orchestration.
//!
//! The Runtime feeds one event at a time into the [`Client`] and executes
//! the resulting actions, coordinating between:
//! - [`Client`]: Session state machine
//! - [`Transport`]: Server connection
//! - [`Renderer`]: Presentation layer

use std::collections::VecDeque;

use relaychat_client::{
    Client, ClientAction, ClientConfig, ClientEvent, Environment, Notification, TransportEvent,
};

use crate::{Renderer, Transport};

/// Generic runtime that orchestrates Client, Transport, and Renderer.
///
/// # Type Parameters
///
/// - `T`: Server connection
/// - `R`: Presentation layer
/// - `E`: Environment providing the clock
pub struct Runtime<T, R, E>
where
    T: Transport,
    R: Renderer,
    E: Environment,
{
    client: Client<E>,
    transport: T,
    renderer: R,
}

impl<T, R, E> Runtime<T, R, E>
where
    T: Transport,
    R: Renderer,
    E: Environment,
{
    /// Create a runtime with a logged-out client.
    pub fn new(transport: T, renderer: R, env: E, config: ClientConfig) -> Self {
        Self { client: Client::new(env, config), transport, renderer }
    }

    /// Session state machine.
    pub fn client(&self) -> &Client<E> {
        &self.client
    }

    /// Server connection.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Presentation layer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the presentation layer, for UI-local state.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Whether the transport has a live connection to receive from.
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Redraw from current client state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn refresh(&mut self) -> Result<(), R::Error> {
        self.renderer.refresh(&self.client)
    }

    /// Log in as `username`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub async fn login(&mut self, username: impl Into<String>) -> Result<(), R::Error> {
        self.dispatch(ClientEvent::Login { username: username.into() }).await
    }

    /// Focus the conversation with `peer`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub async fn select_peer(&mut self, peer: impl Into<String>) -> Result<(), R::Error> {
        self.dispatch(ClientEvent::SelectPeer { peer: peer.into() }).await
    }

    /// Send `content` to the selected peer.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub async fn send_message(&mut self, content: impl Into<String>) -> Result<(), R::Error> {
        self.dispatch(ClientEvent::SendMessage { content: content.into() }).await
    }

    /// Log out of the active session.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub async fn logout(&mut self) -> Result<(), R::Error> {
        self.dispatch(ClientEvent::Logout).await
    }

    /// Receive the next transport event, if a connection exists.
    pub async fn next_transport_event(&mut self) -> Option<TransportEvent> {
        self.transport.recv().await
    }

    /// Process one event produced by the transport.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub async fn handle_transport_event(&mut self, event: TransportEvent) -> Result<(), R::Error> {
        self.dispatch(event.into()).await
    }

    /// Receive and process one transport event.
    ///
    /// Returns `false` if there was no connection to receive from.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub async fn pump(&mut self) -> Result<bool, R::Error> {
        match self.transport.recv().await {
            Some(event) => {
                self.handle_transport_event(event).await?;
                Ok(true)
            },
            None => Ok(false),
        }
    }

    /// Process one event and execute everything it causes.
    ///
    /// Client errors are not returned; they are shown through the renderer
    /// as [`Notification::Error`].
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub async fn dispatch(&mut self, event: ClientEvent) -> Result<(), R::Error> {
        let actions = self.apply(event)?;
        self.execute(actions).await
    }

    /// Hand an event to the client, routing rejections to the renderer.
    fn apply(&mut self, event: ClientEvent) -> Result<Vec<ClientAction>, R::Error> {
        match self.client.handle(event) {
            Ok(actions) => Ok(actions),
            Err(e) => {
                tracing::warn!(error = %e, "client rejected event");
                self.renderer.render(&Notification::Error(e), &self.client)?;
                Ok(Vec::new())
            },
        }
    }

    /// Execute actions in order. Actions caused by executing an action are
    /// queued behind the ones already pending.
    async fn execute(&mut self, actions: Vec<ClientAction>) -> Result<(), R::Error> {
        let mut pending: VecDeque<ClientAction> = actions.into();

        while let Some(action) = pending.pop_front() {
            match action {
                ClientAction::Connect { endpoint, username } => {
                    if let Err(e) = self.transport.connect(&endpoint, &username) {
                        tracing::warn!(error = %e, endpoint = %endpoint, "connect failed");
                        let closed =
                            ClientEvent::TransportClosed { clean: false, reason: Some(e.to_string()) };
                        pending.extend(self.apply(closed)?);
                    }
                },
                ClientAction::Send(message) => {
                    if let Err(e) = self.transport.send(message).await {
                        tracing::debug!(error = %e, "dropping outbound message");
                    }
                },
                ClientAction::Close => self.transport.close().await,
                ClientAction::Notify(notification) => {
                    self.renderer.render(&notification, &self.client)?;
                },
            }
        }

        Ok(())
    }
}
