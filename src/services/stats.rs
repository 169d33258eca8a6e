//! Statistics service

use chrono::{DateTime, Utc};

use crate::{models::TicketStats, repository::Repository};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Dashboard counters over every ticket, as of `now`
    pub fn ticket_stats(&self, now: DateTime<Utc>) -> TicketStats {
        TicketStats::collect(self.repository.tickets_list(), now)
    }

    /// Number of tickets not yet completed
    pub fn count_open(&self, now: DateTime<Utc>) -> i64 {
        self.ticket_stats(now).open_tickets
    }
}
