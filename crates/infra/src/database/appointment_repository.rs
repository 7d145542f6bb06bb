//! Appointment repository implementation using SQLite
//!
//! The partial unique index `idx_appointments_slot_active` makes the
//! one-appointment-per-slot rule atomic; violations come back as
//! `Conflict("time slot is already occupied")`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use clinicdesk_core::AppointmentStore;
use clinicdesk_domain::{Appointment, AppointmentStatus, ClinicError, Result};
use rusqlite::types::{ToSqlOutput, Type};
use rusqlite::{params, OptionalExtension, Row, ToSql};
use tracing::warn;

use super::manager::{run_blocking, DbManager};
use crate::errors::conversions::{is_unique_violation, sql_error};

const APPOINTMENT_COLUMNS: &str = "id, patient_id, patient_name, appointment_date, \
                                   appointment_time, service, doctor, status, price, \
                                   duration_minutes, notes, created_at, updated_at";

const SLOT_TAKEN: &str = "time slot is already occupied";

/// SQLite-backed implementation of `AppointmentStore`
pub struct SqliteAppointmentRepository {
    db: Arc<DbManager>,
}

impl SqliteAppointmentRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    async fn query_appointments(
        &self,
        filter: &'static str,
        args: Vec<QueryArg>,
    ) -> Result<Vec<Appointment>> {
        run_blocking(&self.db, move |conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {APPOINTMENT_COLUMNS} FROM appointments
                     WHERE deleted_at IS NULL {filter}"
                ))
                .map_err(sql_error)?;
            let rows = stmt
                .query_map(rusqlite::params_from_iter(args.iter()), map_appointment_row)
                .map_err(sql_error)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(sql_error)
        })
        .await
    }
}

/// Owned query parameter so filters can be moved into the blocking task.
enum QueryArg {
    Int(i64),
    Date(NaiveDate),
}

impl ToSql for QueryArg {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Self::Int(value) => value.to_sql(),
            Self::Date(value) => value.to_sql(),
        }
    }
}

#[async_trait]
impl AppointmentStore for SqliteAppointmentRepository {
    async fn get(&self, id: i64) -> Result<Appointment> {
        run_blocking(&self.db, move |conn| {
            conn.query_row(
                &format!(
                    "SELECT {APPOINTMENT_COLUMNS} FROM appointments
                     WHERE id = ?1 AND deleted_at IS NULL"
                ),
                params![id],
                map_appointment_row,
            )
            .optional()
            .map_err(sql_error)?
            .ok_or_else(|| ClinicError::not_found(format!("appointment {id} not found")))
        })
        .await
    }

    async fn get_all(&self) -> Result<Vec<Appointment>> {
        self.query_appointments("ORDER BY appointment_date DESC, appointment_time DESC", Vec::new())
            .await
    }

    async fn create(&self, mut appointment: Appointment) -> Result<Appointment> {
        let date = required_date(&appointment)?;
        run_blocking(&self.db, move |conn| {
            conn.execute(
                "INSERT INTO appointments (patient_id, patient_name, appointment_date,
                                           appointment_time, service, doctor, status, price,
                                           duration_minutes, notes, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    appointment.patient_id,
                    appointment.patient_name,
                    date,
                    appointment.time,
                    appointment.service,
                    appointment.doctor,
                    appointment.status.to_string(),
                    appointment.price,
                    appointment.duration_minutes,
                    appointment.notes,
                    appointment.created_at,
                    appointment.updated_at,
                ],
            )
            .map_err(|err| slot_error(err, date, &appointment.time))?;
            appointment.id = conn.last_insert_rowid();
            Ok(appointment)
        })
        .await
    }

    async fn update(&self, appointment: Appointment) -> Result<Appointment> {
        let date = required_date(&appointment)?;
        run_blocking(&self.db, move |conn| {
            let changed = conn
                .execute(
                    "UPDATE appointments
                     SET patient_id = ?1, patient_name = ?2, appointment_date = ?3,
                         appointment_time = ?4, service = ?5, doctor = ?6, status = ?7, price = ?8,
                         duration_minutes = ?9, notes = ?10, updated_at = ?11
                     WHERE id = ?12 AND deleted_at IS NULL",
                    params![
                        appointment.patient_id,
                        appointment.patient_name,
                        date,
                        appointment.time,
                        appointment.service,
                        appointment.doctor,
                        appointment.status.to_string(),
                        appointment.price,
                        appointment.duration_minutes,
                        appointment.notes,
                        appointment.updated_at,
                        appointment.id,
                    ],
                )
                .map_err(|err| slot_error(err, date, &appointment.time))?;
            if changed == 0 {
                return Err(ClinicError::not_found(format!(
                    "appointment {} not found",
                    appointment.id
                )));
            }
            Ok(appointment)
        })
        .await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        run_blocking(&self.db, move |conn| {
            let changed = conn
                .execute(
                    "UPDATE appointments SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
                    params![Utc::now(), id],
                )
                .map_err(sql_error)?;
            if changed == 0 {
                return Err(ClinicError::not_found(format!("appointment {id} not found")));
            }
            Ok(())
        })
        .await
    }

    async fn get_by_patient_id(&self, patient_id: i64) -> Result<Vec<Appointment>> {
        self.query_appointments(
            "AND patient_id = ?1 ORDER BY appointment_date DESC, appointment_time DESC",
            vec![QueryArg::Int(patient_id)],
        )
        .await
    }

    async fn get_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>> {
        self.query_appointments(
            "AND appointment_date = ?1 ORDER BY appointment_time",
            vec![QueryArg::Date(date)],
        )
        .await
    }

    async fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Appointment>> {
        self.query_appointments(
            "AND appointment_date BETWEEN ?1 AND ?2 ORDER BY appointment_date, appointment_time",
            vec![QueryArg::Date(start), QueryArg::Date(end)],
        )
        .await
    }

    async fn check_time_conflict(
        &self,
        date: NaiveDate,
        time: &str,
        exclude_id: i64,
    ) -> Result<bool> {
        let time = time.to_string();
        run_blocking(&self.db, move |conn| {
            conn.query_row(
                "SELECT EXISTS(
                     SELECT 1 FROM appointments
                     WHERE appointment_date = ?1 AND appointment_time = ?2
                       AND id <> ?3 AND deleted_at IS NULL)",
                params![date, time, exclude_id],
                |row| row.get::<_, bool>(0),
            )
            .map_err(sql_error)
        })
        .await
    }
}

fn required_date(appointment: &Appointment) -> Result<NaiveDate> {
    appointment.date.ok_or_else(|| ClinicError::validation("date is required"))
}

fn slot_error(err: rusqlite::Error, date: NaiveDate, time: &str) -> ClinicError {
    if is_unique_violation(&err) {
        warn!(%date, time, "slot constraint rejected write");
        return ClinicError::conflict(SLOT_TAKEN);
    }
    sql_error(err)
}

fn map_appointment_row(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    let status: String = row.get(7)?;
    let status = status
        .parse::<AppointmentStatus>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, e.into()))?;

    Ok(Appointment {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        patient_name: row.get(2)?,
        date: row.get(3)?,
        time: row.get(4)?,
        service: row.get(5)?,
        doctor: row.get(6)?,
        status,
        price: row.get(8)?,
        duration_minutes: row.get(9)?,
        notes: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}
