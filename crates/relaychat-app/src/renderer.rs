//! Renderer trait for the presentation layer.

use relaychat_client::{Client, Environment, Notification};

/// Presentation collaborator.
///
/// Receives every [`Notification`] the client emits together with
/// read-only access to the client, so it can redraw from current state.
pub trait Renderer {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// React to one notification.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    fn render<E: Environment>(
        &mut self,
        notification: &Notification,
        client: &Client<E>,
    ) -> Result<(), Self::Error>;

    /// Redraw from current state without a triggering notification.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    fn refresh<E: Environment>(&mut self, client: &Client<E>) -> Result<(), Self::Error>;
}
