//! Appointment scheduling service - booking, rescheduling and lifecycle

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use clinicdesk_domain::{Appointment, AppointmentStatus, ClinicError, Result};
use tracing::{debug, info, warn};

use super::ports::AppointmentStore;
use super::validation::validate_appointment;
use crate::patients::PatientStore;
use crate::utils::validation::ensure_valid_id;

const SLOT_TAKEN: &str = "time slot is already occupied";

/// Appointment scheduling service
///
/// Resolves the patient for every write so the cached patient name stays
/// current. Slot uniqueness on create is left to the store.
pub struct AppointmentService {
    appointments: Arc<dyn AppointmentStore>,
    patients: Arc<dyn PatientStore>,
}

impl AppointmentService {
    pub fn new(appointments: Arc<dyn AppointmentStore>, patients: Arc<dyn PatientStore>) -> Self {
        Self { appointments, patients }
    }

    pub async fn get_appointment(&self, id: i64) -> Result<Appointment> {
        ensure_valid_id(id, "appointment")?;
        self.appointments.get(id).await
    }

    pub async fn get_all_appointments(&self) -> Result<Vec<Appointment>> {
        self.appointments.get_all().await
    }

    /// Book a new appointment; it always starts out scheduled
    pub async fn create_appointment(&self, mut appointment: Appointment) -> Result<Appointment> {
        self.validate_appointment(&appointment)?;
        appointment.patient_name = self.resolve_patient_name(appointment.patient_id).await?;

        if appointment.status != AppointmentStatus::Scheduled {
            debug!(requested = %appointment.status, "ignoring caller-supplied status");
        }
        appointment.status = AppointmentStatus::Scheduled;

        let now = Utc::now();
        appointment.created_at = Some(now);
        appointment.updated_at = Some(now);

        let created = self.appointments.create(appointment).await?;
        info!(
            appointment_id = created.id,
            patient_id = created.patient_id,
            time = %created.time,
            "appointment booked"
        );
        Ok(created)
    }

    /// Reschedule or edit an appointment.
    ///
    /// A status change must be a legal transition from the stored status.
    /// `Scheduled` is never a legal target, so an incoming `Scheduled` means
    /// "leave the status alone" and the stored status is kept.
    pub async fn update_appointment(&self, mut appointment: Appointment) -> Result<Appointment> {
        self.validate_appointment(&appointment)?;
        appointment.patient_name = self.resolve_patient_name(appointment.patient_id).await?;

        if let Some(date) = appointment.date {
            let taken = self
                .appointments
                .check_time_conflict(date, &appointment.time, appointment.id)
                .await?;
            if taken {
                warn!(
                    appointment_id = appointment.id,
                    %date,
                    time = %appointment.time,
                    "slot taken"
                );
                return Err(ClinicError::conflict(SLOT_TAKEN));
            }
        }

        let existing = self.appointments.get(appointment.id).await?;
        if appointment.status == AppointmentStatus::Scheduled {
            appointment.status = existing.status;
        } else if existing.status != appointment.status {
            existing.status.transition_to(appointment.status)?;
        }
        appointment.created_at = existing.created_at;
        appointment.updated_at = Some(Utc::now());

        let updated = self.appointments.update(appointment).await?;
        info!(appointment_id = updated.id, "appointment updated");
        Ok(updated)
    }

    pub async fn delete_appointment(&self, id: i64) -> Result<()> {
        ensure_valid_id(id, "appointment")?;
        self.appointments.delete(id).await?;
        info!(appointment_id = id, "appointment deleted");
        Ok(())
    }

    pub async fn complete_appointment(&self, id: i64) -> Result<Appointment> {
        self.move_to(id, AppointmentStatus::Completed).await
    }

    pub async fn cancel_appointment(&self, id: i64) -> Result<Appointment> {
        self.move_to(id, AppointmentStatus::Cancelled).await
    }

    pub async fn get_appointments_by_patient(&self, patient_id: i64) -> Result<Vec<Appointment>> {
        ensure_valid_id(patient_id, "patient")?;
        self.appointments.get_by_patient_id(patient_id).await
    }

    pub async fn get_appointments_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>> {
        self.appointments.get_by_date(date).await
    }

    /// Inclusive on both ends
    pub async fn get_appointments_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Appointment>> {
        if start > end {
            return Err(ClinicError::validation("start date must not be after end date"));
        }
        self.appointments.get_by_date_range(start, end).await
    }

    pub fn validate_appointment(&self, appointment: &Appointment) -> Result<()> {
        validate_appointment(appointment)
    }

    async fn move_to(&self, id: i64, target: AppointmentStatus) -> Result<Appointment> {
        ensure_valid_id(id, "appointment")?;

        let mut appointment = self.appointments.get(id).await?;
        let from = appointment.status;
        appointment.status = from.transition_to(target)?;
        appointment.updated_at = Some(Utc::now());

        let updated = self.appointments.update(appointment).await?;
        info!(appointment_id = id, %from, to = %target, "appointment status changed");
        Ok(updated)
    }

    /// Only a missing patient becomes "patient not found"; storage trouble propagates.
    async fn resolve_patient_name(&self, patient_id: i64) -> Result<String> {
        match self.patients.get(patient_id).await {
            Ok(patient) => Ok(patient.name),
            Err(err) if err.is_not_found() => Err(ClinicError::not_found("patient not found")),
            Err(err) => Err(err),
        }
    }
}
