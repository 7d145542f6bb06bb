//! Doctor accounts and authentication

pub mod ports;
pub mod service;
pub mod validation;

pub use ports::{CredentialHasher, DoctorStore};
pub use service::DoctorService;
pub use validation::validate_doctor;
