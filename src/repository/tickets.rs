//! Ticket domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{Ticket, TicketStatus},
};

impl Repository {
    /// List all tickets, in load order
    pub fn tickets_list(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Get ticket by ID
    pub fn tickets_get_by_id(&self, id: i32) -> AppResult<&Ticket> {
        self.tickets
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Ticket {} not found", id)))
    }

    /// List tickets, optionally restricted to one status and/or a search term.
    ///
    /// The search term matches case-insensitively against the ticket id,
    /// customer name and phone, and device type and model.
    pub fn tickets_filter(&self, status: Option<&TicketStatus>, search: Option<&str>) -> Vec<&Ticket> {
        let needle = search.map(str::to_lowercase);

        self.tickets
            .iter()
            .filter(|t| status.map_or(true, |s| &t.status == s))
            .filter(|t| needle.as_deref().map_or(true, |n| matches_search(t, n)))
            .collect()
    }

    /// Tickets assigned to the named technician
    pub fn tickets_assigned_to(&self, technician: &str) -> Vec<&Ticket> {
        self.tickets
            .iter()
            .filter(|t| t.assigned_to.eq_ignore_ascii_case(technician))
            .collect()
    }
}

fn matches_search(ticket: &Ticket, needle: &str) -> bool {
    ticket.id.to_string().contains(needle)
        || [
            &ticket.customer_name,
            &ticket.customer_phone,
            &ticket.device_type,
            &ticket.device_model,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}
