//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use matola::domain::WebhookVerifier;
use matola::settings::MatolaSettings;

/// Everything the HTTP server needs, resolved from [`MatolaSettings`].
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) webhooks: Arc<WebhookVerifier>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, webhooks: Arc<WebhookVerifier>) -> Self {
        Self {
            bind_addr,
            webhooks,
        }
    }

    /// Build the server configuration from loaded settings.
    #[must_use]
    pub fn from_settings(settings: &MatolaSettings) -> Self {
        Self::new(
            settings.bind_addr(),
            Arc::new(WebhookVerifier::new(settings.webhook_secrets())),
        )
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
