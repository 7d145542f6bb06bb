//! Patient management service - core business logic

use std::sync::Arc;

use chrono::Utc;
use clinicdesk_domain::{ClinicError, Patient, Result};
use tracing::{debug, info, warn};

use super::ports::PatientStore;
use super::validation::validate_patient;
use crate::utils::validation::{ensure_valid_id, is_blank};

/// Patient management service
///
/// Enforces field rules and phone / national-ID uniqueness among active
/// patients before delegating to the store.
pub struct PatientService {
    store: Arc<dyn PatientStore>,
}

impl PatientService {
    /// Create a new patient service
    pub fn new(store: Arc<dyn PatientStore>) -> Self {
        Self { store }
    }

    pub async fn get_patient(&self, id: i64) -> Result<Patient> {
        ensure_valid_id(id, "patient")?;
        self.store.get(id).await
    }

    pub async fn get_all_patients(&self) -> Result<Vec<Patient>> {
        self.store.get_all().await
    }

    /// Validate, check uniqueness, stamp timestamps and persist
    pub async fn create_patient(&self, mut patient: Patient) -> Result<Patient> {
        self.validate_patient(&patient)?;
        self.ensure_unique(&patient, None).await?;

        let now = Utc::now();
        patient.created_at = Some(now);
        patient.updated_at = Some(now);

        let created = self.store.create(patient).await?;
        info!(patient_id = created.id, "patient created");
        Ok(created)
    }

    /// Same rules as create; a duplicate only counts when it is another patient
    pub async fn update_patient(&self, mut patient: Patient) -> Result<Patient> {
        self.validate_patient(&patient)?;
        self.ensure_unique(&patient, Some(patient.id)).await?;

        patient.updated_at = Some(Utc::now());

        let updated = self.store.update(patient).await?;
        info!(patient_id = updated.id, "patient updated");
        Ok(updated)
    }

    pub async fn delete_patient(&self, id: i64) -> Result<()> {
        ensure_valid_id(id, "patient")?;
        self.store.delete(id).await?;
        info!(patient_id = id, "patient deleted");
        Ok(())
    }

    /// Blank queries return every patient
    pub async fn search_patients(&self, query: &str) -> Result<Vec<Patient>> {
        if is_blank(query) {
            return self.store.get_all().await;
        }
        debug!(query_len = query.len(), "searching patients");
        self.store.search(query.trim()).await
    }

    pub fn validate_patient(&self, patient: &Patient) -> Result<()> {
        validate_patient(patient)
    }

    /// Lookup failures propagate; they are never read as "no duplicate".
    async fn ensure_unique(&self, patient: &Patient, current_id: Option<i64>) -> Result<()> {
        if let Some(national_id) = patient.national_id() {
            if let Some(existing) = self.store.get_by_national_id(national_id).await? {
                if Some(existing.id) != current_id {
                    warn!(existing_id = existing.id, "rejected duplicate national ID");
                    return Err(ClinicError::conflict("duplicate national ID"));
                }
            }
        }

        if let Some(phone) = patient.phone() {
            if let Some(existing) = self.store.get_by_phone(phone).await? {
                if Some(existing.id) != current_id {
                    warn!(existing_id = existing.id, "rejected duplicate phone");
                    return Err(ClinicError::conflict("duplicate phone"));
                }
            }
        }

        Ok(())
    }
}
