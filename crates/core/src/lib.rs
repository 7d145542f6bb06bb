//! # ClinicDesk Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Use cases for patients, the service catalog, doctors, appointments and
//!   the dashboard
//! - Port/adapter interfaces (traits) for storage and credential hashing
//!
//! ## Architecture Principles
//! - Only depends on `clinicdesk-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Stateless between calls; every operation is one request's worth of work

pub mod appointments;
pub mod catalog;
pub mod dashboard;
pub mod doctors;
pub mod patients;
pub mod utils;

// Re-export specific items to avoid ambiguity
pub use appointments::ports::AppointmentStore;
pub use appointments::AppointmentService;
pub use catalog::ports::ServiceStore;
pub use catalog::CatalogService;
pub use dashboard::DashboardService;
pub use doctors::ports::{CredentialHasher, DoctorStore};
pub use doctors::DoctorService;
pub use patients::ports::PatientStore;
pub use patients::PatientService;
