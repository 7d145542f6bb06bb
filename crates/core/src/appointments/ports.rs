//! Port interfaces for appointment storage

use async_trait::async_trait;
use chrono::NaiveDate;
use clinicdesk_domain::{Appointment, Result};

/// Trait for appointment persistence and retrieval
///
/// Implementations must keep at most one active appointment per
/// (date, time) slot and report a violation as
/// `Conflict("time slot is already occupied")`, for both create and update.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn get(&self, id: i64) -> Result<Appointment>;
    async fn get_all(&self) -> Result<Vec<Appointment>>;
    async fn create(&self, appointment: Appointment) -> Result<Appointment>;
    async fn update(&self, appointment: Appointment) -> Result<Appointment>;
    async fn delete(&self, id: i64) -> Result<()>;

    async fn get_by_patient_id(&self, patient_id: i64) -> Result<Vec<Appointment>>;

    /// Appointments on one calendar day
    async fn get_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>>;

    /// Appointments between `start` and `end`, both inclusive
    async fn get_by_date_range(&self, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<Appointment>>;

    /// Whether an active appointment other than `exclude_id` holds the slot
    async fn check_time_conflict(&self, date: NaiveDate, time: &str, exclude_id: i64)
        -> Result<bool>;
}
