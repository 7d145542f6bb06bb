//! Argon2 password hashing
//!
//! Credentials are stored as PHC strings (`$argon2id$v=19$...`), so the salt
//! and parameters travel with the hash. Hashing runs on the blocking pool.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use clinicdesk_core::CredentialHasher;
use clinicdesk_domain::{ClinicError, Result};

use crate::errors::map_join_error;

/// `CredentialHasher` backed by Argon2id with default parameters
#[derive(Default, Clone)]
pub struct Argon2CredentialHasher {
    argon2: Argon2<'static>,
}

impl Argon2CredentialHasher {
    pub fn new() -> Self {
        Self::default()
    }

    fn hash_blocking(argon2: &Argon2<'static>, password: &str) -> Result<String> {
        let salt = SaltString::generate(OsRng);
        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| ClinicError::Internal(format!("Password hashing failed: {e}")))
    }

    /// Malformed stored credentials never match.
    fn verify_blocking(argon2: &Argon2<'static>, password: &str, credential: &str) -> Result<bool> {
        let Ok(parsed) = PasswordHash::new(credential) else {
            return Ok(false);
        };
        match argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(ClinicError::Internal(format!("Password verification failed: {e}"))),
        }
    }
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    async fn hash(&self, password: &str) -> Result<String> {
        let argon2 = self.argon2.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || Self::hash_blocking(&argon2, &password))
            .await
            .map_err(map_join_error)?
    }

    async fn verify(&self, password: &str, credential: &str) -> Result<bool> {
        let argon2 = self.argon2.clone();
        let password = password.to_owned();
        let credential = credential.to_owned();
        tokio::task::spawn_blocking(move || Self::verify_blocking(&argon2, &password, &credential))
            .await
            .map_err(map_join_error)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_is_salted_phc_string() {
        let hasher = Argon2CredentialHasher::new();

        let first = hasher.hash("secret").await.unwrap();
        let second = hasher.hash("secret").await.unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(!first.contains("secret"));
    }

    #[tokio::test]
    async fn verify_accepts_only_the_original_password() {
        let hasher = Argon2CredentialHasher::new();
        let credential = hasher.hash("secret").await.unwrap();

        assert!(hasher.verify("secret", &credential).await.unwrap());
        assert!(!hasher.verify("Secret", &credential).await.unwrap());
        assert!(!hasher.verify("", &credential).await.unwrap());
    }

    #[tokio::test]
    async fn plaintext_credentials_never_match() {
        let hasher = Argon2CredentialHasher::new();
        assert!(!hasher.verify("secret", "secret").await.unwrap());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn hashing_leaves_the_runtime_free() {
        let hasher = Argon2CredentialHasher::new();
        let ticker = tokio::spawn(async { tokio::task::yield_now().await });

        let credential = hasher.hash("secret").await.unwrap();

        ticker.await.unwrap();
        assert!(hasher.verify("secret", &credential).await.unwrap());
    }
}
