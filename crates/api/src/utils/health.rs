//! Health check types reported by `GET /health`

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Share of healthy components at or above which the service counts as up.
const HEALTHY_THRESHOLD: f64 = 0.8;

/// Overall health status of the application
///
/// # Example
/// ```
/// use clinicdesk_api::utils::health::{ComponentHealth, HealthStatus};
///
/// let mut status = HealthStatus::new()
///     .add_component(ComponentHealth::healthy("storage"))
///     .add_component(ComponentHealth::unhealthy("cache", "connection timeout"));
/// status.calculate_score();
///
/// assert!((status.score - 0.5).abs() < f64::EPSILON);
/// assert!(!status.is_healthy);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub is_healthy: bool,

    /// From 0.0 to 1.0: healthy components over total components
    pub score: f64,

    pub components: Vec<ComponentHealth>,

    /// Unix timestamp when the check ran
    pub timestamp: i64,
}

impl HealthStatus {
    /// Healthy with score 1.0 and no components
    pub fn new() -> Self {
        Self {
            is_healthy: true,
            score: 1.0,
            components: Vec::new(),
            timestamp: Utc::now().timestamp(),
        }
    }

    pub fn add_component(mut self, component: ComponentHealth) -> Self {
        self.components.push(component);
        self
    }

    /// Recompute `score` and `is_healthy`; call after all components are in.
    #[allow(clippy::cast_precision_loss)]
    pub fn calculate_score(&mut self) {
        if self.components.is_empty() {
            return;
        }

        let healthy_count = self.components.iter().filter(|c| c.is_healthy).count();

        self.score = healthy_count as f64 / self.components.len() as f64;
        self.is_healthy = self.score >= HEALTHY_THRESHOLD;
    }
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Health of a single component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub is_healthy: bool,
    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: true, message: None }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: false, message: Some(message.into()) }
    }
}
