//! # ClinicDesk Domain
//!
//! Business domain types and models for ClinicDesk.
//!
//! This crate contains:
//! - Entities (Patient, Service, Doctor, Appointment)
//! - The appointment status state machine
//! - Dashboard and finance report types
//! - Domain error types and Result definitions
//! - Configuration structures and validation limits
//!
//! ## Architecture
//! - No dependencies on other ClinicDesk crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
