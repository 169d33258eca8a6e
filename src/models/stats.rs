//! Dashboard statistics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ticket::{Ticket, TicketStatus};

/// Ticket counters shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketStats {
    /// Every ticket that is not completed
    pub open_tickets: i64,
    pub in_progress: i64,
    pub overdue: i64,
    /// Completed tickets last updated on the same UTC day as `now`
    pub completed_today: i64,
}

impl TicketStats {
    pub fn collect<'a>(tickets: impl IntoIterator<Item = &'a Ticket>, now: DateTime<Utc>) -> Self {
        let today = now.date_naive();

        tickets.into_iter().fold(Self::default(), |mut stats, ticket| {
            match ticket.status {
                TicketStatus::Completed => {
                    if ticket.updated_at.date_naive() == today {
                        stats.completed_today += 1;
                    }
                }
                TicketStatus::InProgress => {
                    stats.open_tickets += 1;
                    stats.in_progress += 1;
                }
                _ => stats.open_tickets += 1,
            }
            if ticket.is_overdue(now) {
                stats.overdue += 1;
            }
            stats
        })
    }
}
