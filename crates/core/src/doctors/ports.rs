//! Port interfaces for doctor storage and credential handling

use async_trait::async_trait;
use clinicdesk_domain::{Doctor, Result};

/// Trait for doctor persistence and retrieval
///
/// Login uniqueness is a storage constraint; a violation surfaces as a
/// storage error, not as a use-case conflict.
#[async_trait]
pub trait DoctorStore: Send + Sync {
    async fn get(&self, id: i64) -> Result<Doctor>;
    async fn get_all(&self) -> Result<Vec<Doctor>>;
    async fn create(&self, doctor: Doctor) -> Result<Doctor>;
    async fn update(&self, doctor: Doctor) -> Result<Doctor>;
    async fn delete(&self, id: i64) -> Result<()>;

    /// `Ok(None)` when no doctor has this login; `Err` only for storage trouble
    async fn get_by_login(&self, login: &str) -> Result<Option<Doctor>>;
}

/// Trait for turning secrets into stored credentials and checking them
///
/// Implementations must compare in constant time and keep CPU-heavy work off
/// the async executor.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Produce a self-describing credential string for `password`
    async fn hash(&self, password: &str) -> Result<String>;

    /// Check `password` against a credential produced by [`Self::hash`]
    async fn verify(&self, password: &str, credential: &str) -> Result<bool>;
}
