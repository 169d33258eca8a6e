//! Data models for RepairDesk

pub mod stats;
pub mod technician;
pub mod ticket;

// Re-export commonly used types
pub use stats::TicketStats;
pub use technician::Technician;
pub use ticket::{Part, Ticket, TicketStatus, TicketView, WorkNote};
