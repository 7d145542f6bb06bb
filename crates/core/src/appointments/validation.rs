//! Appointment field rules
//!
//! Kept apart from conflict detection so it can run without storage.

use chrono::NaiveTime;
use clinicdesk_domain::constants::APPOINTMENT_TIME_FORMAT;
use clinicdesk_domain::{Appointment, Result};

use crate::utils::validation::{ensure, is_blank};

pub fn validate_appointment(appointment: &Appointment) -> Result<()> {
    ensure(appointment.patient_id > 0, "patient ID is required")?;
    ensure(appointment.date.is_some(), "date is required")?;
    ensure(!is_blank(&appointment.service), "service is required")?;
    ensure(
        appointment.time.is_empty() || is_slot_time(&appointment.time),
        "time must be in HH:MM format",
    )?;
    Ok(())
}

/// Zero-padded 24h `HH:MM`; slots compare as strings so "9:00" is refused.
fn is_slot_time(time: &str) -> bool {
    time.len() == 5 && NaiveTime::parse_from_str(time, APPOINTMENT_TIME_FORMAT).is_ok()
}
