//! RepairDesk - Repair Shop Ticketing
//!
//! Server-rendered ticket desk for a repair shop: HTML pages for the
//! front desk and technicians, plus htmx fragment endpoints for in-page
//! updates.

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower::Layer;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    services::ServeDir,
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod models;
pub mod repository;
pub mod services;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub templates: Arc<views::Templates>,
}

/// Create the application with all routes, trimming trailing slashes
/// before routing
pub fn create_app(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(create_router(state))
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.assets.static_dir);

    Router::new()
        // Dashboard
        .route("/", get(api::dashboard::dashboard))
        // Tickets
        .route(
            "/tickets",
            get(api::tickets::list_tickets).post(api::tickets::create_ticket),
        )
        .route("/tickets/new", get(api::tickets::new_ticket_form))
        .route("/tickets/search", get(api::tickets::search_tickets))
        .route(
            "/tickets/:id",
            get(api::tickets::view_ticket).post(api::tickets::update_ticket),
        )
        .route("/tickets/:id/edit", get(api::tickets::edit_ticket_form))
        // Ticket actions (htmx fragments)
        .route("/tickets/:id/status", post(api::tickets::update_ticket_status))
        .route("/tickets/:id/parts", post(api::tickets::add_part))
        .route("/tickets/:id/parts/:part_id", delete(api::tickets::delete_part))
        .route("/tickets/:id/notes", post(api::tickets::add_note))
        // Technician view
        .route("/technician", get(api::technician::queue))
        .route("/technician/:id", get(api::technician::ticket_view))
        // htmx counters
        .route("/api/stats/open", get(api::stats::open_tickets_count))
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        .nest_service("/static", static_files)
        .layer(CompressionLayer::new())
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
