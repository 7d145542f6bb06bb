//! Domain types and models

pub mod appointment;
pub mod doctor;
pub mod patient;
pub mod service;
pub mod stats;

pub use appointment::{Appointment, AppointmentStatus};
pub use doctor::Doctor;
pub use patient::Patient;
pub use service::Service;
pub use stats::{DashboardStats, DayIncome, FinanceReport, WeekIncome};
