//! Service catalog repository implementation using SQLite

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use clinicdesk_core::ServiceStore;
use clinicdesk_domain::{ClinicError, Result, Service};
use rusqlite::{params, OptionalExtension, Row};

use super::like_pattern;
use super::manager::{run_blocking, DbManager};
use crate::errors::conversions::sql_error;

const SERVICE_COLUMNS: &str =
    "id, name, category, description, notes, price, duration_minutes, created_at, updated_at";

/// SQLite-backed implementation of `ServiceStore`
pub struct SqliteServiceRepository {
    db: Arc<DbManager>,
}

impl SqliteServiceRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    async fn query_services(
        &self,
        filter: &'static str,
        arg: Option<String>,
    ) -> Result<Vec<Service>> {
        run_blocking(&self.db, move |conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {SERVICE_COLUMNS} FROM services WHERE deleted_at IS NULL {filter}
                     ORDER BY name"
                ))
                .map_err(sql_error)?;
            let rows = match arg {
                Some(arg) => stmt.query_map(params![arg], map_service_row),
                None => stmt.query_map([], map_service_row),
            }
            .map_err(sql_error)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(sql_error)
        })
        .await
    }
}

#[async_trait]
impl ServiceStore for SqliteServiceRepository {
    async fn get(&self, id: i64) -> Result<Service> {
        run_blocking(&self.db, move |conn| {
            conn.query_row(
                &format!(
                    "SELECT {SERVICE_COLUMNS} FROM services WHERE id = ?1 AND deleted_at IS NULL"
                ),
                params![id],
                map_service_row,
            )
            .optional()
            .map_err(sql_error)?
            .ok_or_else(|| ClinicError::not_found(format!("service {id} not found")))
        })
        .await
    }

    async fn get_all(&self) -> Result<Vec<Service>> {
        self.query_services("", None).await
    }

    async fn create(&self, mut service: Service) -> Result<Service> {
        run_blocking(&self.db, move |conn| {
            conn.execute(
                "INSERT INTO services (name, category, description, notes, price, duration_minutes,
                                       created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    service.name,
                    service.category,
                    service.description,
                    service.notes,
                    service.price,
                    service.duration_minutes,
                    service.created_at,
                    service.updated_at,
                ],
            )
            .map_err(sql_error)?;
            service.id = conn.last_insert_rowid();
            Ok(service)
        })
        .await
    }

    async fn update(&self, service: Service) -> Result<Service> {
        run_blocking(&self.db, move |conn| {
            let changed = conn
                .execute(
                    "UPDATE services
                     SET name = ?1, category = ?2, description = ?3, notes = ?4, price = ?5,
                         duration_minutes = ?6, updated_at = ?7
                     WHERE id = ?8 AND deleted_at IS NULL",
                    params![
                        service.name,
                        service.category,
                        service.description,
                        service.notes,
                        service.price,
                        service.duration_minutes,
                        service.updated_at,
                        service.id,
                    ],
                )
                .map_err(sql_error)?;
            if changed == 0 {
                return Err(ClinicError::not_found(format!("service {} not found", service.id)));
            }
            Ok(service)
        })
        .await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        run_blocking(&self.db, move |conn| {
            let changed = conn
                .execute(
                    "UPDATE services SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
                    params![Utc::now(), id],
                )
                .map_err(sql_error)?;
            if changed == 0 {
                return Err(ClinicError::not_found(format!("service {id} not found")));
            }
            Ok(())
        })
        .await
    }

    async fn get_by_category(&self, category: &str) -> Result<Vec<Service>> {
        self.query_services("AND category = ?1", Some(category.to_string())).await
    }

    async fn search(&self, query: &str) -> Result<Vec<Service>> {
        self.query_services(
            "AND (name LIKE ?1 ESCAPE '\\'
                  OR category LIKE ?1 ESCAPE '\\'
                  OR COALESCE(description, '') LIKE ?1 ESCAPE '\\'
                  OR COALESCE(notes, '') LIKE ?1 ESCAPE '\\')",
            Some(like_pattern(query)),
        )
        .await
    }
}

fn map_service_row(row: &Row<'_>) -> rusqlite::Result<Service> {
    Ok(Service {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        description: row.get(3)?,
        notes: row.get(4)?,
        price: row.get(5)?,
        duration_minutes: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}
