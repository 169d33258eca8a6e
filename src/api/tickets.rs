//! Ticket pages and htmx actions

use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use minijinja::{context, Value};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        ticket::{NoteForm, PartForm, StatusForm, TicketForm, TicketQuery},
        Part, Ticket, TicketStatus, TicketView, WorkNote,
    },
    AppState,
};

use super::{render_fragment, render_page, CurrentUser};

/// Status choices offered by the ticket forms
fn status_options() -> Vec<Value> {
    TicketStatus::KNOWN
        .iter()
        .map(|status| context! { code => status.code(), label => status.label() })
        .collect()
}

fn ticket_list(state: &AppState, query: &TicketQuery) -> AppResult<Html<String>> {
    let now = Utc::now();
    let tickets: Vec<TicketView> = state
        .services
        .tickets
        .search(query)
        .into_iter()
        .map(|t| t.view(now))
        .collect();

    render_fragment(state, "ticket-list", context! { tickets => tickets })
}

fn ticket_form(state: &AppState, user: String, ticket: &Ticket) -> AppResult<Html<String>> {
    render_page(
        state,
        "ticket-form",
        context! {
            current_user => user,
            ticket => ticket.view(Utc::now()),
            technicians => state.services.technicians.list(),
            statuses => status_options(),
        },
    )
}

/// Render the detailed ticket view shared by front desk and technicians
pub(super) fn ticket_detail(state: &AppState, user: String, id: i32) -> AppResult<Html<String>> {
    let ticket = state.services.tickets.get_by_id(id)?;

    render_page(
        state,
        "technician-view",
        context! {
            current_user => user,
            ticket => ticket.view(Utc::now()),
            statuses => status_options(),
        },
    )
}

/// Ticket list fragment, filtered by `status` and `search`
pub async fn list_tickets(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<TicketQuery>, AppError>,
) -> AppResult<Html<String>> {
    tracing::info!(status = %query.status, search = %query.search, "Listing tickets");
    ticket_list(&state, &query)
}

/// Ticket search fragment (htmx live search)
pub async fn search_tickets(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<TicketQuery>, AppError>,
) -> AppResult<Html<String>> {
    tracing::info!(search = %query.search, "Searching tickets");
    ticket_list(&state, &query)
}

/// Empty ticket form
pub async fn new_ticket_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Html<String>> {
    ticket_form(&state, user, &Ticket::default())
}

/// Ticket creation
pub async fn create_ticket(
    CurrentUser(user): CurrentUser,
    WithRejection(Form(form), _): WithRejection<Form<TicketForm>, AppError>,
) -> AppResult<Redirect> {
    form.validate()?;

    tracing::info!(created_by = %user, status = %form.status(), ?form, "Creating ticket");

    Ok(Redirect::to("/"))
}

/// Ticket detail page
pub async fn view_ticket(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Html<String>> {
    ticket_detail(&state, user, id)
}

/// Edit form for an existing ticket
pub async fn edit_ticket_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Html<String>> {
    let ticket = state.services.tickets.get_by_id(id)?;
    ticket_form(&state, user, ticket)
}

/// Ticket update
pub async fn update_ticket(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Form(form), _): WithRejection<Form<TicketForm>, AppError>,
) -> AppResult<Redirect> {
    state.services.tickets.get_by_id(id)?;
    form.validate()?;

    tracing::info!(ticket_id = id, updated_by = %user, ?form, "Updating ticket");

    Ok(Redirect::to(&format!("/tickets/{}", id)))
}

/// Status change; answers with the refreshed status badge
pub async fn update_ticket_status(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Form(form), _): WithRejection<Form<StatusForm>, AppError>,
) -> AppResult<Html<String>> {
    let status = form.status.trim();
    if status.is_empty() {
        return Err(AppError::Validation("Status must not be empty".to_string()));
    }
    let now = Utc::now();
    let mut ticket = state.services.tickets.get_by_id(id)?.clone();
    ticket.status = TicketStatus::from(status);
    ticket.updated_at = now;

    tracing::info!(ticket_id = id, status = %ticket.status, updated_by = %user, "Updating ticket status");

    render_fragment(&state, "status-badge", context! { ticket => ticket.view(now) })
}

/// Part addition; answers with the new part row
pub async fn add_part(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Form(form), _): WithRejection<Form<PartForm>, AppError>,
) -> AppResult<Html<String>> {
    form.validate()?;
    let ticket = state.services.tickets.get_by_id(id)?;

    let part = Part {
        id: ticket.next_part_id(),
        ticket_id: id,
        name: form.part_name,
        quantity: form.quantity,
        cost: form.cost,
        added_at: Utc::now(),
        added_by: user,
    };

    tracing::info!(ticket_id = id, part = %part.name, quantity = part.quantity, cost = %part.cost, "Adding part");

    render_fragment(&state, "part-row", context! { ticket_id => id, part => part })
}

/// Part removal; the row is dropped client-side
pub async fn delete_part(
    State(state): State<AppState>,
    WithRejection(Path((id, part_id)), _): WithRejection<Path<(i32, i32)>, AppError>,
) -> AppResult<StatusCode> {
    state.services.tickets.get_by_id(id)?;

    tracing::info!(ticket_id = id, part_id, "Deleting part");

    Ok(StatusCode::OK)
}

/// Work note addition; answers with the rendered note
pub async fn add_note(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Form(form), _): WithRejection<Form<NoteForm>, AppError>,
) -> AppResult<Html<String>> {
    let content = form.note.trim();
    if content.is_empty() {
        return Err(AppError::Validation("Note must not be empty".to_string()));
    }
    let ticket = state.services.tickets.get_by_id(id)?;

    let note = WorkNote {
        id: ticket.notes.len() as i32 + 1,
        ticket_id: id,
        content: content.to_string(),
        author: user,
        timestamp: Utc::now(),
    };

    tracing::info!(ticket_id = id, author = %note.author, "Adding note");

    render_fragment(&state, "work-note", context! { note => note })
}
