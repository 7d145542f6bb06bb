//! Port interfaces for the service catalog

use async_trait::async_trait;
use clinicdesk_domain::{Result, Service};

/// Trait for catalog persistence and retrieval
#[async_trait]
pub trait ServiceStore: Send + Sync {
    /// Get a service by ID, failing with `NotFound` when absent
    async fn get(&self, id: i64) -> Result<Service>;
    async fn get_all(&self) -> Result<Vec<Service>>;
    async fn create(&self, service: Service) -> Result<Service>;
    async fn update(&self, service: Service) -> Result<Service>;
    async fn delete(&self, id: i64) -> Result<()>;

    /// Exact category match
    async fn get_by_category(&self, category: &str) -> Result<Vec<Service>>;

    /// Case-insensitive substring search over name, category and description
    async fn search(&self, query: &str) -> Result<Vec<Service>>;
}
