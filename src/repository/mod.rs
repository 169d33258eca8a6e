//! Repository layer over the in-memory reference data
//!
//! Tickets and technicians are loaded once at startup and shared read-only
//! between requests.

pub mod technicians;
pub mod tickets;

use std::sync::Arc;

use crate::models::{Technician, Ticket};

/// Main repository struct holding the reference data
#[derive(Clone)]
pub struct Repository {
    tickets: Arc<[Ticket]>,
    technicians: Arc<[Technician]>,
}

impl Repository {
    /// Create a new repository over the given data
    pub fn new(tickets: Vec<Ticket>, technicians: Vec<Technician>) -> Self {
        Self {
            tickets: tickets.into(),
            technicians: technicians.into(),
        }
    }
}
