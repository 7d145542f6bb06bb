//! In-memory patient store

use async_trait::async_trait;
use clinicdesk_core::PatientStore;
use clinicdesk_domain::{ClinicError, Patient, Result};
use parking_lot::RwLock;

use super::{contains_ignore_case, Table};

#[derive(Debug, Default)]
pub struct InMemoryPatientStore {
    table: RwLock<Table<Patient>>,
}

impl InMemoryPatientStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Phone and national ID stay unique among stored patients, like the SQLite indexes.
fn clash(rows: &[Patient], candidate: &Patient) -> Option<ClinicError> {
    let others = || rows.iter().filter(|p| p.id != candidate.id);
    if candidate.national_id().is_some()
        && others().any(|p| p.national_id() == candidate.national_id())
    {
        return Some(ClinicError::conflict("duplicate national ID"));
    }
    if candidate.phone().is_some() && others().any(|p| p.phone() == candidate.phone()) {
        return Some(ClinicError::conflict("duplicate phone"));
    }
    None
}

fn not_found(id: i64) -> ClinicError {
    ClinicError::not_found(format!("patient {id} not found"))
}

#[async_trait]
impl PatientStore for InMemoryPatientStore {
    async fn get(&self, id: i64) -> Result<Patient> {
        self.table.read().rows.iter().find(|p| p.id == id).cloned().ok_or_else(|| not_found(id))
    }

    async fn get_all(&self) -> Result<Vec<Patient>> {
        let mut rows = self.table.read().rows.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn create(&self, mut patient: Patient) -> Result<Patient> {
        let mut table = self.table.write();
        patient.id = 0;
        if let Some(err) = clash(&table.rows, &patient) {
            return Err(err);
        }
        patient.id = table.allocate_id();
        table.rows.push(patient.clone());
        Ok(patient)
    }

    async fn update(&self, patient: Patient) -> Result<Patient> {
        let mut table = self.table.write();
        if let Some(err) = clash(&table.rows, &patient) {
            return Err(err);
        }
        let slot = table
            .rows
            .iter_mut()
            .find(|p| p.id == patient.id)
            .ok_or_else(|| not_found(patient.id))?;
        *slot = patient.clone();
        Ok(patient)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut table = self.table.write();
        let index = table.rows.iter().position(|p| p.id == id).ok_or_else(|| not_found(id))?;
        table.rows.remove(index);
        Ok(())
    }

    async fn get_by_phone(&self, phone: &str) -> Result<Option<Patient>> {
        Ok(self.table.read().rows.iter().find(|p| p.phone() == Some(phone)).cloned())
    }

    async fn get_by_national_id(&self, national_id: &str) -> Result<Option<Patient>> {
        Ok(self.table.read().rows.iter().find(|p| p.national_id() == Some(national_id)).cloned())
    }

    async fn search(&self, query: &str) -> Result<Vec<Patient>> {
        let needle = query.to_lowercase();
        let mut found: Vec<Patient> = self
            .table
            .read()
            .rows
            .iter()
            .filter(|p| {
                contains_ignore_case(&p.name, &needle)
                    || [p.phone(), p.email(), p.national_id()]
                        .into_iter()
                        .flatten()
                        .any(|value| contains_ignore_case(value, &needle))
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }
}
