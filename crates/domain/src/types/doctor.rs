//! Doctor accounts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Doctor account
///
/// `password` holds the plaintext on the way in and the credential hash once
/// persisted. It is never serialised when empty, and authentication clears it
/// before returning the record.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub login: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(rename = "isAdmin", alias = "is_admin")]
    pub is_admin: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Doctor {
    pub fn new(
        name: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            login: login.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    /// Copy of the record safe to hand back to callers.
    pub fn without_password(mut self) -> Self {
        self.password.clear();
        self
    }
}

impl std::fmt::Debug for Doctor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Doctor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("login", &self.login)
            .field("password", &"[REDACTED]")
            .field("is_admin", &self.is_admin)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_not_serialized_once_cleared() {
        let doctor = Doctor::new("Dr. Smith", "smith", "secret").without_password();
        let json = serde_json::to_value(&doctor).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["isAdmin"], false);
    }

    #[test]
    fn debug_redacts_password() {
        let doctor = Doctor::new("Dr. Smith", "smith", "secret");
        assert!(!format!("{doctor:?}").contains("secret"));
    }
}
