//! Appointments and their lifecycle

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::DAY_KEY_FORMAT;
use crate::errors::{ClinicError, Result};
use crate::impl_domain_status_conversions;

/// Appointment lifecycle state
///
/// `Scheduled` is the only initial state; `Completed` and `Cancelled` are
/// terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl_domain_status_conversions!(AppointmentStatus {
    Scheduled => "scheduled",
    Completed => "completed",
    Cancelled => "cancelled",
});

impl AppointmentStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Validate a forward move to `target`.
    ///
    /// Only `scheduled → completed` and `scheduled → cancelled` exist.
    pub fn transition_to(self, target: Self) -> Result<Self> {
        match (self, target) {
            (Self::Scheduled, Self::Completed | Self::Cancelled) => Ok(target),
            (from, to) => {
                Err(ClinicError::conflict(format!("cannot move appointment from {from} to {to}")))
            }
        }
    }
}

/// A booked visit
///
/// Slot identity is the pair (`date`, `time`); duration plays no part in
/// conflict detection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    /// Cached from the patient record when the appointment is written.
    pub patient_name: String,
    /// Required; `None` only for unvalidated input. Accepts `YYYY-MM-DD` or
    /// an RFC 3339 timestamp, whose calendar date is kept.
    #[serde(deserialize_with = "deserialize_day")]
    pub date: Option<NaiveDate>,
    /// Time of day, `HH:MM`.
    pub time: String,
    /// Service name.
    pub service: String,
    /// Doctor name.
    pub doctor: Option<String>,
    pub status: AppointmentStatus,
    pub price: f64,
    pub duration_minutes: i32,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Appointment {
    pub fn new(
        patient_id: i64,
        date: NaiveDate,
        time: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            patient_id,
            date: Some(date),
            time: time.into(),
            service: service.into(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_doctor(mut self, doctor: impl Into<String>) -> Self {
        self.doctor = Some(doctor.into());
        self
    }

    /// Whether this appointment occupies the given slot.
    pub fn occupies(&self, date: NaiveDate, time: &str) -> bool {
        self.date == Some(date) && self.time == time
    }
}

fn deserialize_day<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(raw, DAY_KEY_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|stamp| stamp.date_naive()))
        .map(Some)
        .map_err(|_| serde::de::Error::custom(format!("invalid date: {raw}")))
}
