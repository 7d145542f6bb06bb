//! Doctor repository implementation using SQLite
//!
//! The `password` field of a stored doctor carries the credential hash.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use clinicdesk_core::DoctorStore;
use clinicdesk_domain::{ClinicError, Doctor, Result};
use rusqlite::{params, OptionalExtension, Row};

use super::manager::{run_blocking, DbManager};
use crate::errors::conversions::sql_error;

const DOCTOR_COLUMNS: &str =
    "id, name, email, login, password_hash, is_admin, created_at, updated_at";

/// SQLite-backed implementation of `DoctorStore`
pub struct SqliteDoctorRepository {
    db: Arc<DbManager>,
}

impl SqliteDoctorRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DoctorStore for SqliteDoctorRepository {
    async fn get(&self, id: i64) -> Result<Doctor> {
        run_blocking(&self.db, move |conn| {
            conn.query_row(
                &format!(
                    "SELECT {DOCTOR_COLUMNS} FROM doctors WHERE id = ?1 AND deleted_at IS NULL"
                ),
                params![id],
                map_doctor_row,
            )
            .optional()
            .map_err(sql_error)?
            .ok_or_else(|| ClinicError::not_found(format!("doctor {id} not found")))
        })
        .await
    }

    async fn get_all(&self) -> Result<Vec<Doctor>> {
        run_blocking(&self.db, |conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {DOCTOR_COLUMNS} FROM doctors WHERE deleted_at IS NULL ORDER BY name"
                ))
                .map_err(sql_error)?;
            let rows = stmt.query_map([], map_doctor_row).map_err(sql_error)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(sql_error)
        })
        .await
    }

    async fn create(&self, mut doctor: Doctor) -> Result<Doctor> {
        run_blocking(&self.db, move |conn| {
            conn.execute(
                "INSERT INTO doctors (name, email, login, password_hash, is_admin, created_at,
                                      updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    doctor.name,
                    doctor.email,
                    doctor.login,
                    doctor.password,
                    doctor.is_admin,
                    doctor.created_at,
                    doctor.updated_at,
                ],
            )
            .map_err(sql_error)?;
            doctor.id = conn.last_insert_rowid();
            Ok(doctor)
        })
        .await
    }

    async fn update(&self, doctor: Doctor) -> Result<Doctor> {
        run_blocking(&self.db, move |conn| {
            let changed = conn
                .execute(
                    "UPDATE doctors
                     SET name = ?1, email = ?2, login = ?3, password_hash = ?4, is_admin = ?5,
                         updated_at = ?6
                     WHERE id = ?7 AND deleted_at IS NULL",
                    params![
                        doctor.name,
                        doctor.email,
                        doctor.login,
                        doctor.password,
                        doctor.is_admin,
                        doctor.updated_at,
                        doctor.id,
                    ],
                )
                .map_err(sql_error)?;
            if changed == 0 {
                return Err(ClinicError::not_found(format!("doctor {} not found", doctor.id)));
            }
            Ok(doctor)
        })
        .await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        run_blocking(&self.db, move |conn| {
            let changed = conn
                .execute(
                    "UPDATE doctors SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
                    params![Utc::now(), id],
                )
                .map_err(sql_error)?;
            if changed == 0 {
                return Err(ClinicError::not_found(format!("doctor {id} not found")));
            }
            Ok(())
        })
        .await
    }

    async fn get_by_login(&self, login: &str) -> Result<Option<Doctor>> {
        let login = login.to_string();
        run_blocking(&self.db, move |conn| {
            conn.query_row(
                &format!(
                    "SELECT {DOCTOR_COLUMNS} FROM doctors WHERE login = ?1 AND deleted_at IS NULL"
                ),
                params![login],
                map_doctor_row,
            )
            .optional()
            .map_err(sql_error)
        })
        .await
    }
}

fn map_doctor_row(row: &Row<'_>) -> rusqlite::Result<Doctor> {
    Ok(Doctor {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        login: row.get(3)?,
        password: row.get(4)?,
        is_admin: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}
