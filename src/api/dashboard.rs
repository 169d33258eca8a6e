//! Dashboard page

use axum::{extract::State, response::Html};
use chrono::Utc;
use minijinja::context;

use crate::{error::AppResult, models::TicketView};

use super::{render_page, CurrentUser};

/// Main dashboard: counters and every ticket
pub async fn dashboard(
    State(state): State<crate::AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Html<String>> {
    let now = Utc::now();
    let tickets: Vec<TicketView> = state
        .services
        .tickets
        .list()
        .iter()
        .map(|t| t.view(now))
        .collect();

    render_page(
        &state,
        "dashboard",
        context! {
            current_user => user,
            heading => "Dashboard",
            stats => state.services.stats.ticket_stats(now),
            tickets => tickets,
        },
    )
}
