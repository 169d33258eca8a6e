//! Technician domain methods on Repository

use super::Repository;
use crate::models::Technician;

impl Repository {
    /// List all technicians
    pub fn technicians_list(&self) -> &[Technician] {
        &self.technicians
    }
}
