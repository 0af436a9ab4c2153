//! Matola entry-point: loads settings and serves health endpoints and payment
//! webhooks.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use matola::inbound::http::health::HealthState;
use matola::settings::MatolaSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = MatolaSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let config = ServerConfig::from_settings(&settings);
    info!(bind_addr = %config.bind_addr(), "starting matola");

    let webhook_providers = config.webhooks.configured_providers();
    if webhook_providers.is_empty() {
        warn!("no webhook secrets configured; every payment callback will be rejected");
    }
    let health_state = web::Data::new(HealthState::new(webhook_providers));
    let server = create_server(health_state.clone(), config)?;
    let outcome = server.await;
    health_state.mark_draining();
    outcome
}
