//! Patient records

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Patient record
///
/// `phone` and `national_id` are unique among active patients when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Patient {
    /// Assigned by the store on create; `0` until then.
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    /// Exactly 12 characters when present.
    pub national_id: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Patient {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_national_id(mut self, national_id: impl Into<String>) -> Self {
        self.national_id = Some(national_id.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Phone number, treating an empty string as absent.
    pub fn phone(&self) -> Option<&str> {
        non_empty(self.phone.as_deref())
    }

    /// National ID, treating an empty string as absent.
    pub fn national_id(&self) -> Option<&str> {
        non_empty(self.national_id.as_deref())
    }

    pub fn email(&self) -> Option<&str> {
        non_empty(self.email.as_deref())
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
