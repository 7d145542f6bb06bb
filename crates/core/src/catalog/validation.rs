//! Catalog field rules

use clinicdesk_domain::constants::{
    SERVICE_CATEGORY_MAX_LEN, SERVICE_MAX_DURATION_MINUTES, SERVICE_NAME_MAX_LEN,
    SERVICE_TEXT_MAX_LEN,
};
use clinicdesk_domain::{Result, Service};

use crate::utils::validation::{char_len, ensure, is_blank, too_long};

/// Validate a catalog entry without touching storage.
pub fn validate_service(service: &Service) -> Result<()> {
    ensure(!is_blank(&service.name), "service name is required")?;
    ensure(char_len(&service.name) <= SERVICE_NAME_MAX_LEN, "service name is too long")?;

    ensure(!is_blank(&service.category), "service category is required")?;
    ensure(
        char_len(&service.category) <= SERVICE_CATEGORY_MAX_LEN,
        "service category is too long",
    )?;

    // NaN fails the comparison and is rejected along with negatives
    ensure(service.price >= 0.0, "service price cannot be negative")?;

    ensure(service.duration_minutes >= 0, "service duration cannot be negative")?;
    ensure(
        service.duration_minutes <= SERVICE_MAX_DURATION_MINUTES,
        "service duration is too long",
    )?;

    ensure(
        !too_long(service.description.as_deref(), SERVICE_TEXT_MAX_LEN),
        "service description is too long",
    )?;
    ensure(
        !too_long(service.notes.as_deref(), SERVICE_TEXT_MAX_LEN),
        "service notes are too long",
    )?;

    Ok(())
}
