//! RepairDesk Server - Repair Shop Ticketing
//!
//! Server-rendered HTML application for repair tickets.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{extract::Request, ServiceExt};
use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repairdesk_server::{
    config::AppConfig, create_app, fixtures, repository::Repository, services::Services,
    views::Templates, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("repairdesk_server={},tower_http=debug", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting RepairDesk Server v{}", env!("CARGO_PKG_VERSION"));

    // Compile one rendering unit per page
    let templates = Templates::load(&config.templates.dir).with_context(|| {
        format!("Failed to load templates from {}", config.templates.dir.display())
    })?;

    tracing::info!("Loaded {} page templates", templates.page_count());

    // Reference data
    let repository = if config.data.demo_data {
        tracing::warn!("Serving demo tickets (data.demo_data = true)");
        Repository::new(fixtures::demo_tickets(Utc::now()), fixtures::demo_technicians())
    } else {
        Repository::new(Vec::new(), Vec::new())
    };

    // Save server address before moving config
    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(Services::new(repository)),
        templates: Arc::new(templates),
    };

    let app = create_app(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
