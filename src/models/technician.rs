//! Technician model

use serde::{Deserialize, Serialize};

/// Repair technician (read-only reference data)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Technician {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// Number of tickets currently assigned
    pub active_jobs: i32,
    pub is_available: bool,
}
