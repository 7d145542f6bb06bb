//! Credential handling

pub mod password;

pub use password::Argon2CredentialHasher;
