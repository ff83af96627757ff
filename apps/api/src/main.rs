mod application;
mod catalog;
mod config;
mod contact;
mod errors;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::application::pipeline::MailRouting;
use crate::application::relay::HttpMailRelay;
use crate::catalog::client::CatalogClient;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Careers API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize catalog client
    let catalog = CatalogClient::new(
        config.jobs_api_url.clone(),
        Duration::from_secs(config.catalog_timeout_secs),
    )
    .context("Failed to build catalog HTTP client")?;
    info!("Catalog client initialized ({})", config.jobs_api_url);

    // Initialize mail relay
    let relay = HttpMailRelay::new(
        config.mail_relay_url.clone(),
        config.mail_relay_api_key.clone(),
        Duration::from_secs(config.relay_timeout_secs),
    )
    .context("Failed to build mail relay HTTP client")?;
    info!(
        "Mail relay initialized (timeout {}s, {} recruiter recipients)",
        config.relay_timeout_secs,
        config.mail_recipients.len()
    );

    let routing = MailRouting {
        from: config.mail_from.clone(),
        recruiters: config.mail_recipients.clone(),
    };

    // Build app state
    let state = AppState {
        config: config.clone(),
        catalog,
        relay: Arc::new(relay),
        routing,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the website origin once it is configurable

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
