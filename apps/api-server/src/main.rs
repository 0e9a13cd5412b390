//! # Scribe API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::HttpServer;
use anyhow::Context;

use api_server::telemetry::init_telemetry;
use api_server::{AppConfig, AppState, create_app};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env files and configuration
    let config = AppConfig::load();

    init_telemetry(&config.telemetry);

    // The listener only starts once the store is configured and reachable
    let state = match AppState::new(&config.store).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Error initializing post store: {}", e);
            return Err(e).context("post store initialization failed");
        }
    };

    let expose_stack = config.environment.exposes_error_details();

    tracing::info!(
        "Server running in {} mode on http://{}:{}",
        config.environment.as_str(),
        config.host,
        config.port
    );

    HttpServer::new(move || create_app(state.clone(), expose_stack))
        .bind((config.host.as_str(), config.port))
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
        .run()
        .await
        .context("server error")
}
