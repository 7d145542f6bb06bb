//! In-memory service catalog store

use async_trait::async_trait;
use clinicdesk_core::ServiceStore;
use clinicdesk_domain::{ClinicError, Result, Service};
use parking_lot::RwLock;

use super::{contains_ignore_case, Table};

#[derive(Debug, Default)]
pub struct InMemoryServiceStore {
    table: RwLock<Table<Service>>,
}

impl InMemoryServiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(&self, keep: impl Fn(&Service) -> bool) -> Vec<Service> {
        let mut rows: Vec<Service> =
            self.table.read().rows.iter().filter(|s| keep(s)).cloned().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }
}

fn not_found(id: i64) -> ClinicError {
    ClinicError::not_found(format!("service {id} not found"))
}

#[async_trait]
impl ServiceStore for InMemoryServiceStore {
    async fn get(&self, id: i64) -> Result<Service> {
        self.table.read().rows.iter().find(|s| s.id == id).cloned().ok_or_else(|| not_found(id))
    }

    async fn get_all(&self) -> Result<Vec<Service>> {
        Ok(self.sorted(|_| true))
    }

    async fn create(&self, mut service: Service) -> Result<Service> {
        let mut table = self.table.write();
        service.id = table.allocate_id();
        table.rows.push(service.clone());
        Ok(service)
    }

    async fn update(&self, service: Service) -> Result<Service> {
        let mut table = self.table.write();
        let slot = table
            .rows
            .iter_mut()
            .find(|s| s.id == service.id)
            .ok_or_else(|| not_found(service.id))?;
        *slot = service.clone();
        Ok(service)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut table = self.table.write();
        let index = table.rows.iter().position(|s| s.id == id).ok_or_else(|| not_found(id))?;
        table.rows.remove(index);
        Ok(())
    }

    async fn get_by_category(&self, category: &str) -> Result<Vec<Service>> {
        Ok(self.sorted(|s| s.category == category))
    }

    async fn search(&self, query: &str) -> Result<Vec<Service>> {
        let needle = query.to_lowercase();
        Ok(self.sorted(|s| {
            contains_ignore_case(&s.name, &needle)
                || contains_ignore_case(&s.category, &needle)
                || [s.description.as_deref(), s.notes.as_deref()]
                    .into_iter()
                    .flatten()
                    .any(|value| contains_ignore_case(value, &needle))
        }))
    }
}
