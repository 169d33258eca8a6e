//! Ticket service

use crate::{
    error::AppResult,
    models::{ticket::TicketQuery, Ticket},
    repository::Repository,
};

#[derive(Clone)]
pub struct TicketsService {
    repository: Repository,
}

impl TicketsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub fn list(&self) -> &[Ticket] {
        self.repository.tickets_list()
    }

    /// List tickets matching the optional status and search parameters
    pub fn search(&self, query: &TicketQuery) -> Vec<&Ticket> {
        let status = query.status();
        self.repository
            .tickets_filter(status.as_ref(), query.search())
    }

    pub fn get_by_id(&self, id: i32) -> AppResult<&Ticket> {
        self.repository.tickets_get_by_id(id)
    }

    /// Work queue of a technician
    pub fn queue_for(&self, technician: &str) -> Vec<&Ticket> {
        self.repository.tickets_assigned_to(technician)
    }
}
