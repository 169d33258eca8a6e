//! Counter endpoints polled by the dashboard

use axum::extract::State;
use chrono::Utc;

/// Number of open tickets, as plain text
pub async fn open_tickets_count(State(state): State<crate::AppState>) -> String {
    state.services.stats.count_open(Utc::now()).to_string()
}
