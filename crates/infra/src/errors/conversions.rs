//! Conversions from external infrastructure errors into domain errors.

use clinicdesk_domain::ClinicError;
use rusqlite::Error as SqlError;
use tokio::task::JoinError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ClinicError);

impl From<InfraError> for ClinicError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ClinicError> for InfraError {
    fn from(value: ClinicError) -> Self {
        InfraError(value)
    }
}

trait IntoClinicError {
    fn into_clinic(self) -> ClinicError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → ClinicError */
/* -------------------------------------------------------------------------- */

/// SQLite extended result code for a UNIQUE constraint failure.
pub(crate) const SQLITE_CONSTRAINT_UNIQUE: i32 = 2067;

impl IntoClinicError for SqlError {
    fn into_clinic(self) -> ClinicError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        ClinicError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        ClinicError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, SQLITE_CONSTRAINT_UNIQUE) => {
                        ClinicError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        ClinicError::Database("foreign key constraint violation".into())
                    }
                    _ => ClinicError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => ClinicError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                ClinicError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                ClinicError::Database(format!("invalid column type: {ty}"))
            }
            RE::InvalidPath(path) => ClinicError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => ClinicError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_clinic())
    }
}

/// Whether a rusqlite error is a UNIQUE constraint failure.
pub(crate) fn is_unique_violation(err: &SqlError) -> bool {
    matches!(
        err,
        SqlError::SqliteFailure(e, _) if e.extended_code == SQLITE_CONSTRAINT_UNIQUE
    )
}

/// The SQLite message of a UNIQUE constraint failure, e.g.
/// `UNIQUE constraint failed: patients.phone`.
pub(crate) fn unique_violation_message(err: &SqlError) -> Option<&str> {
    match err {
        SqlError::SqliteFailure(e, message) if e.extended_code == SQLITE_CONSTRAINT_UNIQUE => {
            Some(message.as_deref().unwrap_or_default())
        }
        _ => None,
    }
}

/// Map a rusqlite error straight into the domain error.
pub(crate) fn sql_error(err: SqlError) -> ClinicError {
    ClinicError::from(InfraError::from(err))
}

/* -------------------------------------------------------------------------- */
/* r2d2 / tokio → ClinicError */
/* -------------------------------------------------------------------------- */

pub fn map_pool_error(err: r2d2::Error) -> ClinicError {
    ClinicError::Database(format!("connection pool error: {err}"))
}

pub fn map_join_error(err: JoinError) -> ClinicError {
    ClinicError::Internal(format!("Task join error: {err}"))
}
