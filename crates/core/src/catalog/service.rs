//! Catalog service - validation and lookups over the service store

use std::sync::Arc;

use chrono::Utc;
use clinicdesk_domain::{Result, Service};
use tracing::info;

use super::ports::ServiceStore;
use super::validation::validate_service;
use crate::utils::validation::{ensure_valid_id, is_blank};

/// Catalog management service
pub struct CatalogService {
    store: Arc<dyn ServiceStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ServiceStore>) -> Self {
        Self { store }
    }

    pub async fn get_service(&self, id: i64) -> Result<Service> {
        ensure_valid_id(id, "service")?;
        self.store.get(id).await
    }

    pub async fn get_all_services(&self) -> Result<Vec<Service>> {
        self.store.get_all().await
    }

    pub async fn create_service(&self, mut service: Service) -> Result<Service> {
        self.validate_service(&service)?;

        let now = Utc::now();
        service.created_at = Some(now);
        service.updated_at = Some(now);

        let created = self.store.create(service).await?;
        info!(service_id = created.id, name = %created.name, "service created");
        Ok(created)
    }

    pub async fn update_service(&self, mut service: Service) -> Result<Service> {
        self.validate_service(&service)?;

        service.updated_at = Some(Utc::now());

        let updated = self.store.update(service).await?;
        info!(service_id = updated.id, "service updated");
        Ok(updated)
    }

    pub async fn delete_service(&self, id: i64) -> Result<()> {
        ensure_valid_id(id, "service")?;
        self.store.delete(id).await?;
        info!(service_id = id, "service deleted");
        Ok(())
    }

    /// Blank category returns the whole catalog
    pub async fn get_services_by_category(&self, category: &str) -> Result<Vec<Service>> {
        if is_blank(category) {
            return self.store.get_all().await;
        }
        self.store.get_by_category(category.trim()).await
    }

    /// Blank queries return the whole catalog
    pub async fn search_services(&self, query: &str) -> Result<Vec<Service>> {
        if is_blank(query) {
            return self.store.get_all().await;
        }
        self.store.search(query.trim()).await
    }

    pub fn validate_service(&self, service: &Service) -> Result<()> {
        validate_service(service)
    }
}
