//! Technician-facing views

use axum::{
    extract::{Path, State},
    response::Html,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use minijinja::context;

use crate::{
    error::{AppError, AppResult},
    models::{TicketStats, TicketView},
    AppState,
};

use super::{render_page, tickets::ticket_detail, CurrentUser};

/// Work queue of the signed-in technician
pub async fn queue(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Html<String>> {
    let now = Utc::now();
    let queue = state.services.tickets.queue_for(&user);
    let stats = TicketStats::collect(queue.iter().copied(), now);
    let tickets: Vec<TicketView> = queue.into_iter().map(|t| t.view(now)).collect();

    render_page(
        &state,
        "dashboard",
        context! {
            current_user => user,
            heading => "My Queue",
            stats => stats,
            tickets => tickets,
        },
    )
}

/// Detailed ticket view for the bench
pub async fn ticket_view(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Html<String>> {
    ticket_detail(&state, user, id)
}
