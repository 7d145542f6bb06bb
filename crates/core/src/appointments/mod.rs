//! Appointment scheduling

pub mod ports;
pub mod service;
pub mod validation;

pub use ports::AppointmentStore;
pub use service::AppointmentService;
pub use validation::validate_appointment;
