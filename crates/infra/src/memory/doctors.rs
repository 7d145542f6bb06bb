//! In-memory doctor store

use async_trait::async_trait;
use clinicdesk_core::DoctorStore;
use clinicdesk_domain::{ClinicError, Doctor, Result};
use parking_lot::RwLock;

use super::Table;

#[derive(Debug, Default)]
pub struct InMemoryDoctorStore {
    table: RwLock<Table<Doctor>>,
}

impl InMemoryDoctorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn login_taken(rows: &[Doctor], candidate: &Doctor) -> bool {
    rows.iter().any(|d| d.id != candidate.id && d.login == candidate.login)
}

fn not_found(id: i64) -> ClinicError {
    ClinicError::not_found(format!("doctor {id} not found"))
}

#[async_trait]
impl DoctorStore for InMemoryDoctorStore {
    async fn get(&self, id: i64) -> Result<Doctor> {
        self.table.read().rows.iter().find(|d| d.id == id).cloned().ok_or_else(|| not_found(id))
    }

    async fn get_all(&self) -> Result<Vec<Doctor>> {
        let mut rows = self.table.read().rows.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn create(&self, mut doctor: Doctor) -> Result<Doctor> {
        let mut table = self.table.write();
        doctor.id = 0;
        if login_taken(&table.rows, &doctor) {
            return Err(ClinicError::Database("unique constraint violation".into()));
        }
        doctor.id = table.allocate_id();
        table.rows.push(doctor.clone());
        Ok(doctor)
    }

    async fn update(&self, doctor: Doctor) -> Result<Doctor> {
        let mut table = self.table.write();
        if login_taken(&table.rows, &doctor) {
            return Err(ClinicError::Database("unique constraint violation".into()));
        }
        let slot = table
            .rows
            .iter_mut()
            .find(|d| d.id == doctor.id)
            .ok_or_else(|| not_found(doctor.id))?;
        *slot = doctor.clone();
        Ok(doctor)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut table = self.table.write();
        let index = table.rows.iter().position(|d| d.id == id).ok_or_else(|| not_found(id))?;
        table.rows.remove(index);
        Ok(())
    }

    async fn get_by_login(&self, login: &str) -> Result<Option<Doctor>> {
        Ok(self.table.read().rows.iter().find(|d| d.login == login).cloned())
    }
}
