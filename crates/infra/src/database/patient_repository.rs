//! Patient repository implementation using SQLite

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use clinicdesk_core::PatientStore;
use clinicdesk_domain::{ClinicError, Patient, Result};
use rusqlite::{params, OptionalExtension, Row};
use tracing::warn;

use super::like_pattern;
use super::manager::{run_blocking, DbManager};
use crate::errors::conversions::{sql_error, unique_violation_message};

const PATIENT_COLUMNS: &str = "id, name, phone, national_id, email, birth_date, address, notes, \
                               created_at, updated_at";

/// SQLite-backed implementation of `PatientStore`
pub struct SqlitePatientRepository {
    db: Arc<DbManager>,
}

impl SqlitePatientRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PatientStore for SqlitePatientRepository {
    async fn get(&self, id: i64) -> Result<Patient> {
        run_blocking(&self.db, move |conn| {
            conn.query_row(
                &format!(
                    "SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?1 AND deleted_at IS NULL"
                ),
                params![id],
                map_patient_row,
            )
            .optional()
            .map_err(sql_error)?
            .ok_or_else(|| ClinicError::not_found(format!("patient {id} not found")))
        })
        .await
    }

    async fn get_all(&self) -> Result<Vec<Patient>> {
        run_blocking(&self.db, |conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {PATIENT_COLUMNS} FROM patients WHERE deleted_at IS NULL
                     ORDER BY created_at DESC, id DESC"
                ))
                .map_err(sql_error)?;
            let rows = stmt.query_map([], map_patient_row).map_err(sql_error)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(sql_error)
        })
        .await
    }

    async fn create(&self, mut patient: Patient) -> Result<Patient> {
        run_blocking(&self.db, move |conn| {
            conn.execute(
                "INSERT INTO patients (name, phone, national_id, email, birth_date, address, notes,
                                       created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    patient.name,
                    patient.phone(),
                    patient.national_id(),
                    patient.email(),
                    patient.birth_date,
                    patient.address,
                    patient.notes,
                    patient.created_at,
                    patient.updated_at,
                ],
            )
            .map_err(duplicate_error)?;
            patient.id = conn.last_insert_rowid();
            Ok(patient)
        })
        .await
    }

    async fn update(&self, patient: Patient) -> Result<Patient> {
        run_blocking(&self.db, move |conn| {
            let changed = conn
                .execute(
                    "UPDATE patients
                     SET name = ?1, phone = ?2, national_id = ?3, email = ?4, birth_date = ?5,
                         address = ?6, notes = ?7, updated_at = ?8
                     WHERE id = ?9 AND deleted_at IS NULL",
                    params![
                        patient.name,
                        patient.phone(),
                        patient.national_id(),
                        patient.email(),
                        patient.birth_date,
                        patient.address,
                        patient.notes,
                        patient.updated_at,
                        patient.id,
                    ],
                )
                .map_err(duplicate_error)?;
            if changed == 0 {
                return Err(ClinicError::not_found(format!("patient {} not found", patient.id)));
            }
            Ok(patient)
        })
        .await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        run_blocking(&self.db, move |conn| {
            let changed = conn
                .execute(
                    "UPDATE patients SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
                    params![Utc::now(), id],
                )
                .map_err(sql_error)?;
            if changed == 0 {
                return Err(ClinicError::not_found(format!("patient {id} not found")));
            }
            Ok(())
        })
        .await
    }

    async fn get_by_phone(&self, phone: &str) -> Result<Option<Patient>> {
        let phone = phone.to_string();
        run_blocking(&self.db, move |conn| {
            conn.query_row(
                &format!(
                    "SELECT {PATIENT_COLUMNS} FROM patients WHERE phone = ?1 AND deleted_at IS NULL"
                ),
                params![phone],
                map_patient_row,
            )
            .optional()
            .map_err(sql_error)
        })
        .await
    }

    async fn get_by_national_id(&self, national_id: &str) -> Result<Option<Patient>> {
        let national_id = national_id.to_string();
        run_blocking(&self.db, move |conn| {
            conn.query_row(
                &format!(
                    "SELECT {PATIENT_COLUMNS} FROM patients
                     WHERE national_id = ?1 AND deleted_at IS NULL"
                ),
                params![national_id],
                map_patient_row,
            )
            .optional()
            .map_err(sql_error)
        })
        .await
    }

    async fn search(&self, query: &str) -> Result<Vec<Patient>> {
        let pattern = like_pattern(query);
        run_blocking(&self.db, move |conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {PATIENT_COLUMNS} FROM patients
                     WHERE deleted_at IS NULL
                       AND (name LIKE ?1 ESCAPE '\\'
                            OR COALESCE(phone, '') LIKE ?1 ESCAPE '\\'
                            OR COALESCE(email, '') LIKE ?1 ESCAPE '\\'
                            OR COALESCE(national_id, '') LIKE ?1 ESCAPE '\\')
                     ORDER BY name"
                ))
                .map_err(sql_error)?;
            let rows = stmt.query_map(params![pattern], map_patient_row).map_err(sql_error)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(sql_error)
        })
        .await
    }
}

fn map_patient_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        national_id: row.get(3)?,
        email: row.get(4)?,
        birth_date: row.get(5)?,
        address: row.get(6)?,
        notes: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

/// Unique-index failures lose the race with another writer; report them the
/// way the use-case check does.
fn duplicate_error(err: rusqlite::Error) -> ClinicError {
    let Some(message) = unique_violation_message(&err) else {
        return sql_error(err);
    };
    if message.contains("national_id") {
        warn!("national ID index rejected write");
        ClinicError::conflict("duplicate national ID")
    } else if message.contains("phone") {
        warn!("phone index rejected write");
        ClinicError::conflict("duplicate phone")
    } else {
        sql_error(err)
    }
}
