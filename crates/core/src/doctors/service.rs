//! Doctor service - account management and login

use std::sync::Arc;

use chrono::Utc;
use clinicdesk_domain::{ClinicError, Doctor, Result};
use tracing::{info, warn};

use super::ports::{CredentialHasher, DoctorStore};
use super::validation::validate_doctor;
use crate::utils::validation::{ensure_valid_id, is_blank};

const INVALID_CREDENTIALS: &str = "invalid login or password";

/// Doctor management service
///
/// Passwords are hashed before they reach the store and cleared from every
/// record handed back to callers.
pub struct DoctorService {
    store: Arc<dyn DoctorStore>,
    hasher: Arc<dyn CredentialHasher>,
}

impl DoctorService {
    pub fn new(store: Arc<dyn DoctorStore>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { store, hasher }
    }

    pub async fn get_doctor(&self, id: i64) -> Result<Doctor> {
        ensure_valid_id(id, "doctor")?;
        Ok(self.store.get(id).await?.without_password())
    }

    pub async fn get_all_doctors(&self) -> Result<Vec<Doctor>> {
        let doctors = self.store.get_all().await?;
        Ok(doctors.into_iter().map(Doctor::without_password).collect())
    }

    pub async fn create_doctor(&self, mut doctor: Doctor) -> Result<Doctor> {
        self.validate_doctor(&doctor)?;

        doctor.password = self.hasher.hash(&doctor.password).await?;
        let now = Utc::now();
        doctor.created_at = Some(now);
        doctor.updated_at = Some(now);

        let created = self.store.create(doctor).await?;
        info!(doctor_id = created.id, login = %created.login, "doctor created");
        Ok(created.without_password())
    }

    /// Replaces the whole account, so a new password is always required
    pub async fn update_doctor(&self, mut doctor: Doctor) -> Result<Doctor> {
        self.validate_doctor(&doctor)?;

        doctor.password = self.hasher.hash(&doctor.password).await?;
        doctor.updated_at = Some(Utc::now());

        let updated = self.store.update(doctor).await?;
        info!(doctor_id = updated.id, "doctor updated");
        Ok(updated.without_password())
    }

    pub async fn delete_doctor(&self, id: i64) -> Result<()> {
        ensure_valid_id(id, "doctor")?;
        self.store.delete(id).await?;
        info!(doctor_id = id, "doctor deleted");
        Ok(())
    }

    /// Check a login/password pair.
    ///
    /// Unknown logins and wrong passwords fail with the same `Unauthorized`
    /// error. Storage failures other than `NotFound` propagate unchanged.
    pub async fn authenticate_doctor(&self, login: &str, password: &str) -> Result<Doctor> {
        if is_blank(login) || is_blank(password) {
            return Err(ClinicError::validation("login and password are required"));
        }

        let doctor = match self.store.get_by_login(login.trim()).await {
            Ok(Some(doctor)) => doctor,
            Ok(None) => {
                warn!("login attempt for unknown account");
                return Err(ClinicError::unauthorized(INVALID_CREDENTIALS));
            }
            Err(err) if err.is_not_found() => {
                warn!("login attempt for unknown account");
                return Err(ClinicError::unauthorized(INVALID_CREDENTIALS));
            }
            Err(err) => return Err(err),
        };

        if !self.hasher.verify(password, &doctor.password).await? {
            warn!(doctor_id = doctor.id, "login attempt with wrong password");
            return Err(ClinicError::unauthorized(INVALID_CREDENTIALS));
        }

        info!(doctor_id = doctor.id, "doctor authenticated");
        Ok(doctor.without_password())
    }

    pub fn validate_doctor(&self, doctor: &Doctor) -> Result<()> {
        validate_doctor(doctor)
    }
}
