//! Technician service

use crate::{models::Technician, repository::Repository};

#[derive(Clone)]
pub struct TechniciansService {
    repository: Repository,
}

impl TechniciansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub fn list(&self) -> &[Technician] {
        self.repository.technicians_list()
    }
}
