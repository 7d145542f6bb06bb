//! Port interfaces for patient storage
//!
//! Implementations only ever see active (non-deleted) patients.

use async_trait::async_trait;
use clinicdesk_domain::{Patient, Result};

/// Trait for patient persistence and retrieval
#[async_trait]
pub trait PatientStore: Send + Sync {
    /// Get a patient by ID, failing with `NotFound` when absent
    async fn get(&self, id: i64) -> Result<Patient>;

    async fn get_all(&self) -> Result<Vec<Patient>>;

    /// Persist a new patient and return it with its assigned ID
    async fn create(&self, patient: Patient) -> Result<Patient>;

    /// Overwrite an existing patient, failing with `NotFound` when absent
    async fn update(&self, patient: Patient) -> Result<Patient>;

    /// Remove (or soft-delete) a patient, failing with `NotFound` when absent
    async fn delete(&self, id: i64) -> Result<()>;

    /// Look up by phone; `Ok(None)` means no such patient
    async fn get_by_phone(&self, phone: &str) -> Result<Option<Patient>>;

    /// Look up by national ID; `Ok(None)` means no such patient
    async fn get_by_national_id(&self, national_id: &str) -> Result<Option<Patient>>;

    /// Case-insensitive substring search over name, phone, email and national ID
    async fn search(&self, query: &str) -> Result<Vec<Patient>>;
}
