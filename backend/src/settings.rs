//! Runtime settings loaded via OrthoConfig.
//!
//! Values come from `MATOLA_*` environment variables, a `.matola.toml` file,
//! or command-line flags. Webhook secrets are optional: a provider without
//! one has every callback rejected.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::WebhookSecrets;

const DEFAULT_BIND_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Settings for the Matola HTTP service.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MATOLA")]
pub struct MatolaSettings {
    /// Shared secret for Airtel Money callbacks.
    pub airtel_money_webhook_secret: Option<String>,
    /// Shared secret for TNM Mpamba callbacks.
    pub tnm_mpamba_webhook_secret: Option<String>,
    /// Interface to listen on.
    pub bind_host: Option<IpAddr>,
    /// Port to listen on.
    #[ortho_config(default = 8080)]
    pub bind_port: u16,
}

impl MatolaSettings {
    /// Socket address for the HTTP listener; the host falls back to `0.0.0.0`.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_host.unwrap_or(DEFAULT_BIND_HOST), self.bind_port)
    }

    /// Per-provider secrets for the webhook verifier.
    #[must_use]
    pub fn webhook_secrets(&self) -> WebhookSecrets {
        WebhookSecrets::new(
            self.airtel_money_webhook_secret.clone(),
            self.tnm_mpamba_webhook_secret.clone(),
        )
    }
}

impl std::fmt::Debug for MatolaSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |secret: &Option<String>| secret.as_ref().map(|_| "<redacted>");
        f.debug_struct("MatolaSettings")
            .field(
                "airtel_money_webhook_secret",
                &redact(&self.airtel_money_webhook_secret),
            )
            .field(
                "tnm_mpamba_webhook_secret",
                &redact(&self.tnm_mpamba_webhook_secret),
            )
            .field("bind_host", &self.bind_host)
            .field("bind_port", &self.bind_port)
            .finish()
    }
}
