//! SQLite persistence
//!
//! Each repository implements one core store port on top of [`DbManager`].
//! Deletes are soft: rows get a `deleted_at` stamp and disappear from every
//! query.

pub mod appointment_repository;
pub mod doctor_repository;
pub mod manager;
pub mod patient_repository;
pub mod service_repository;

pub use appointment_repository::SqliteAppointmentRepository;
pub use doctor_repository::SqliteDoctorRepository;
pub use manager::*;
pub use patient_repository::SqlitePatientRepository;
pub use service_repository::SqliteServiceRepository;

/// Build a `LIKE` pattern that matches `query` literally anywhere in a value.
pub(crate) fn like_pattern(query: &str) -> String {
    let escaped = query.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    format!("%{escaped}%")
}
