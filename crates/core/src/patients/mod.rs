//! Patient management

pub mod ports;
pub mod service;
pub mod validation;

pub use ports::PatientStore;
pub use service::PatientService;
pub use validation::validate_patient;
