//! Validation limits
//!
//! Centralized location for the field limits enforced by the use-case layer.
//! Lengths count characters, not bytes.

// Patient
pub const PATIENT_NAME_MAX_LEN: usize = 100;
pub const PATIENT_NATIONAL_ID_LEN: usize = 12;
pub const PATIENT_PHONE_MAX_LEN: usize = 20;
pub const PATIENT_EMAIL_MAX_LEN: usize = 100;
pub const PATIENT_ADDRESS_MAX_LEN: usize = 200;
pub const PATIENT_NOTES_MAX_LEN: usize = 500;

// Service catalog
pub const SERVICE_NAME_MAX_LEN: usize = 100;
pub const SERVICE_CATEGORY_MAX_LEN: usize = 50;
pub const SERVICE_TEXT_MAX_LEN: usize = 500;
/// Eight hours.
pub const SERVICE_MAX_DURATION_MINUTES: i32 = 480;

// Doctors
pub const DOCTOR_NAME_MAX_LEN: usize = 255;
pub const DOCTOR_LOGIN_MAX_LEN: usize = 100;
pub const DOCTOR_PASSWORD_MIN_LEN: usize = 4;

// Appointments
pub const APPOINTMENT_TIME_FORMAT: &str = "%H:%M";
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";
