//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data`. Everything in
//! it is built once at start-up and injected, so handlers never reach for
//! process-global clients or secrets.

use std::sync::Arc;

use crate::domain::WebhookVerifier;

/// Dependency bundle for HTTP handlers.
#[derive(Debug, Clone)]
pub struct HttpState {
    pub webhooks: Arc<WebhookVerifier>,
}

impl HttpState {
    #[must_use]
    pub fn new(webhooks: Arc<WebhookVerifier>) -> Self {
        Self { webhooks }
    }
}
