//! # ClinicDesk Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite repositories (rusqlite + r2d2, soft delete)
//! - In-memory stores for development and tests
//! - Argon2 credential hashing
//! - Configuration loading (environment and JSON/TOML files)
//! - Demo fixtures
//!
//! ## Architecture
//! - Implements traits defined in `clinicdesk-core`
//! - Contains all "impure" code (I/O, hashing, configuration sources)

pub mod config;
pub mod database;
pub mod errors;
pub mod fixtures;
pub mod memory;
pub mod security;

// Re-export commonly used items
pub use database::{
    DbManager, SqliteAppointmentRepository, SqliteDoctorRepository, SqlitePatientRepository,
    SqliteServiceRepository,
};
pub use errors::InfraError;
pub use fixtures::{SeedSummary, Seeder};
pub use memory::{
    InMemoryAppointmentStore, InMemoryDoctorStore, InMemoryPatientStore, InMemoryServiceStore,
};
pub use security::Argon2CredentialHasher;
