//! Small validation primitives shared by the use cases
//!
//! Lengths are counted in characters so Cyrillic and Latin names get the same
//! limits.

use clinicdesk_domain::{ClinicError, Result};

/// True when the value is empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// True when an optional value is present and longer than `max` characters.
pub fn too_long(value: Option<&str>, max: usize) -> bool {
    value.is_some_and(|v| char_len(v) > max)
}

/// Fail with a validation error carrying `message` unless `condition` holds.
pub fn ensure(condition: bool, message: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(ClinicError::validation(message))
    }
}

/// Reject non-positive identifiers with `"invalid <entity> ID"`.
pub fn ensure_valid_id(id: i64, entity: &str) -> Result<()> {
    if id <= 0 {
        return Err(ClinicError::validation(format!("invalid {entity} ID")));
    }
    Ok(())
}
