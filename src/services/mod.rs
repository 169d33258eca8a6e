//! Business logic services

pub mod stats;
pub mod technicians;
pub mod tickets;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub tickets: tickets::TicketsService,
    pub technicians: technicians::TechniciansService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            tickets: tickets::TicketsService::new(repository.clone()),
            technicians: technicians::TechniciansService::new(repository.clone()),
            stats: stats::StatsService::new(repository),
        }
    }
}
