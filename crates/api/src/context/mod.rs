//! Application context - dependency injection container

use std::sync::Arc;

use chrono::Utc;
use clinicdesk_core::{
    AppointmentService, AppointmentStore, CatalogService, DashboardService, DoctorService,
    DoctorStore, PatientService, PatientStore, ServiceStore,
};
use clinicdesk_domain::{Config, Result, StorageBackend};
use clinicdesk_infra::{
    Argon2CredentialHasher, DbManager, InMemoryAppointmentStore, InMemoryDoctorStore,
    InMemoryPatientStore, InMemoryServiceStore, Seeder, SqliteAppointmentRepository,
    SqliteDoctorRepository, SqlitePatientRepository, SqliteServiceRepository,
};
use tracing::{error, info, warn};

use crate::utils::health::{ComponentHealth, HealthStatus};

/// The four store ports, built for one backend
struct Stores {
    patients: Arc<dyn PatientStore>,
    services: Arc<dyn ServiceStore>,
    doctors: Arc<dyn DoctorStore>,
    appointments: Arc<dyn AppointmentStore>,
}

/// Where records live; kept for health checks
enum Storage {
    Memory,
    Sqlite(Arc<DbManager>),
}

/// Application context - holds all services and dependencies
///
/// One instance is shared by every request handler behind an `Arc`.
pub struct AppContext {
    pub config: Config,
    pub patients: PatientService,
    pub catalog: CatalogService,
    pub doctors: DoctorService,
    pub appointments: AppointmentService,
    pub dashboard: DashboardService,
    storage: Storage,
}

impl AppContext {
    /// Build the context for the configured backend.
    ///
    /// Opens (and migrates) the SQLite database when selected, then seeds
    /// demo records if `seed_demo_data` is set.
    ///
    /// # Errors
    /// Fails when the database cannot be opened or migrated, or seeding
    /// fails.
    pub async fn new(config: Config) -> Result<Self> {
        let (stores, storage) = match config.database.backend {
            StorageBackend::Memory => {
                info!("using in-memory storage");
                (memory_stores(), Storage::Memory)
            }
            StorageBackend::Sqlite => {
                info!(path = %config.database.path, "using SQLite storage");
                let db = Arc::new(DbManager::new(
                    &config.database.path,
                    config.database.pool_size,
                )?);
                db.run_migrations()?;
                (sqlite_stores(&db), Storage::Sqlite(db))
            }
        };

        let hasher = Arc::new(Argon2CredentialHasher::new());
        let ctx = Self {
            patients: PatientService::new(Arc::clone(&stores.patients)),
            catalog: CatalogService::new(stores.services),
            doctors: DoctorService::new(stores.doctors, hasher),
            appointments: AppointmentService::new(
                Arc::clone(&stores.appointments),
                Arc::clone(&stores.patients),
            ),
            dashboard: DashboardService::new(stores.patients, stores.appointments),
            storage,
            config,
        };

        if ctx.config.seed_demo_data {
            ctx.seed().await?;
        }

        Ok(ctx)
    }

    async fn seed(&self) -> Result<()> {
        let seeder = Seeder {
            patients: &self.patients,
            catalog: &self.catalog,
            doctors: &self.doctors,
            appointments: &self.appointments,
        };

        let summary = seeder.seed_demo_data(Utc::now().date_naive()).await.map_err(|e| {
            error!(error = %e, "failed to seed demo data");
            e
        })?;

        info!(
            patients = summary.patients,
            services = summary.services,
            doctors = summary.doctors,
            appointments = summary.appointments,
            "demo data seeded"
        );
        Ok(())
    }

    /// Check health of the storage backend
    ///
    /// The SQLite check runs on the blocking pool so a stalled connection
    /// never blocks the runtime.
    pub async fn health_check(&self) -> HealthStatus {
        let mut status = HealthStatus::new().add_component(self.check_storage_health().await);
        status.calculate_score();
        status
    }

    async fn check_storage_health(&self) -> ComponentHealth {
        let db = match &self.storage {
            Storage::Memory => return ComponentHealth::healthy("storage"),
            Storage::Sqlite(db) => Arc::clone(db),
        };

        match tokio::task::spawn_blocking(move || db.health_check()).await {
            Ok(Ok(())) => ComponentHealth::healthy("storage"),
            Ok(Err(e)) => {
                warn!(error = %e, "storage health check failed");
                ComponentHealth::unhealthy("storage", format!("query failed: {}", e.message()))
            }
            Err(e) => {
                error!(error = %e, "storage health check task panicked");
                ComponentHealth::unhealthy("storage", format!("task panic: {e}"))
            }
        }
    }
}

fn memory_stores() -> Stores {
    Stores {
        patients: Arc::new(InMemoryPatientStore::new()),
        services: Arc::new(InMemoryServiceStore::new()),
        doctors: Arc::new(InMemoryDoctorStore::new()),
        appointments: Arc::new(InMemoryAppointmentStore::new()),
    }
}

fn sqlite_stores(db: &Arc<DbManager>) -> Stores {
    Stores {
        patients: Arc::new(SqlitePatientRepository::new(Arc::clone(db))),
        services: Arc::new(SqliteServiceRepository::new(Arc::clone(db))),
        doctors: Arc::new(SqliteDoctorRepository::new(Arc::clone(db))),
        appointments: Arc::new(SqliteAppointmentRepository::new(Arc::clone(db))),
    }
}

#[cfg(test)]
mod tests {
    use clinicdesk_domain::DatabaseConfig;
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn memory_context_starts_empty_and_healthy() {
        let ctx = AppContext::new(Config::default()).await.unwrap();

        assert!(ctx.patients.get_all_patients().await.unwrap().is_empty());
        let health = ctx.health_check().await;
        assert!(health.is_healthy);
        assert_eq!(health.components[0].name, "storage");
    }

    #[tokio::test]
    async fn sqlite_context_seeds_demo_data_once() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            database: DatabaseConfig {
                backend: StorageBackend::Sqlite,
                path: temp_dir.path().join("clinic.db").to_string_lossy().to_string(),
                pool_size: 2,
            },
            seed_demo_data: true,
            ..Config::default()
        };

        let first = AppContext::new(config.clone()).await.unwrap();
        let seeded = first.patients.get_all_patients().await.unwrap().len();
        assert!(seeded > 0);
        drop(first);

        let second = AppContext::new(config).await.unwrap();
        assert_eq!(second.patients.get_all_patients().await.unwrap().len(), seeded);
        assert!(second.health_check().await.is_healthy);
    }
}
