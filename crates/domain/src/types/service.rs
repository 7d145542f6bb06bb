//! Service catalog entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A billable service offered by the clinic
///
/// Names are not unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub price: f64,
    pub duration_minutes: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Service {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self { name: name.into(), category: category.into(), ..Self::default() }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_duration(mut self, minutes: i32) -> Self {
        self.duration_minutes = minutes;
        self
    }
}
