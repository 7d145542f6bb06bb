//! In-memory appointment store
//!
//! The slot check and the write happen under one write lock, so two
//! concurrent bookings for the same slot cannot both succeed.

use async_trait::async_trait;
use chrono::NaiveDate;
use clinicdesk_core::AppointmentStore;
use clinicdesk_domain::{Appointment, ClinicError, Result};
use parking_lot::RwLock;

use super::Table;

const SLOT_TAKEN: &str = "time slot is already occupied";

#[derive(Debug, Default)]
pub struct InMemoryAppointmentStore {
    table: RwLock<Table<Appointment>>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn select(&self, keep: impl Fn(&Appointment) -> bool) -> Vec<Appointment> {
        self.table.read().rows.iter().filter(|a| keep(a)).cloned().collect()
    }
}

fn slot_taken(rows: &[Appointment], candidate: &Appointment) -> bool {
    candidate
        .date
        .is_some_and(|date| {
            rows.iter().any(|a| a.id != candidate.id && a.occupies(date, &candidate.time))
        })
}

fn not_found(id: i64) -> ClinicError {
    ClinicError::not_found(format!("appointment {id} not found"))
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn get(&self, id: i64) -> Result<Appointment> {
        self.table.read().rows.iter().find(|a| a.id == id).cloned().ok_or_else(|| not_found(id))
    }

    async fn get_all(&self) -> Result<Vec<Appointment>> {
        let mut rows = self.select(|_| true);
        rows.sort_by(|a, b| (b.date, &b.time).cmp(&(a.date, &a.time)));
        Ok(rows)
    }

    async fn create(&self, mut appointment: Appointment) -> Result<Appointment> {
        let mut table = self.table.write();
        appointment.id = 0;
        if slot_taken(&table.rows, &appointment) {
            return Err(ClinicError::conflict(SLOT_TAKEN));
        }
        appointment.id = table.allocate_id();
        table.rows.push(appointment.clone());
        Ok(appointment)
    }

    async fn update(&self, appointment: Appointment) -> Result<Appointment> {
        let mut table = self.table.write();
        if slot_taken(&table.rows, &appointment) {
            return Err(ClinicError::conflict(SLOT_TAKEN));
        }
        let slot = table
            .rows
            .iter_mut()
            .find(|a| a.id == appointment.id)
            .ok_or_else(|| not_found(appointment.id))?;
        *slot = appointment.clone();
        Ok(appointment)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut table = self.table.write();
        let index = table.rows.iter().position(|a| a.id == id).ok_or_else(|| not_found(id))?;
        table.rows.remove(index);
        Ok(())
    }

    async fn get_by_patient_id(&self, patient_id: i64) -> Result<Vec<Appointment>> {
        let mut rows = self.select(|a| a.patient_id == patient_id);
        rows.sort_by(|a, b| (b.date, &b.time).cmp(&(a.date, &a.time)));
        Ok(rows)
    }

    async fn get_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>> {
        let mut rows = self.select(|a| a.date == Some(date));
        rows.sort_by(|a, b| a.time.cmp(&b.time));
        Ok(rows)
    }

    async fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Appointment>> {
        let mut rows = self.select(|a| a.date.is_some_and(|d| (start..=end).contains(&d)));
        rows.sort_by(|a, b| (a.date, &a.time).cmp(&(b.date, &b.time)));
        Ok(rows)
    }

    async fn check_time_conflict(
        &self,
        date: NaiveDate,
        time: &str,
        exclude_id: i64,
    ) -> Result<bool> {
        Ok(self.table.read().rows.iter().any(|a| a.id != exclude_id && a.occupies(date, time)))
    }
}
