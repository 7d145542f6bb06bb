//! Patient field rules

use clinicdesk_domain::constants::{
    PATIENT_ADDRESS_MAX_LEN, PATIENT_EMAIL_MAX_LEN, PATIENT_NAME_MAX_LEN,
    PATIENT_NATIONAL_ID_LEN, PATIENT_NOTES_MAX_LEN, PATIENT_PHONE_MAX_LEN,
};
use clinicdesk_domain::{Patient, Result};

use crate::utils::validation::{char_len, ensure, is_blank, too_long};

/// Validate a patient record without touching storage.
///
/// Pure: calling it twice on the same input gives the same answer.
pub fn validate_patient(patient: &Patient) -> Result<()> {
    ensure(!is_blank(&patient.name), "patient name is required")?;
    ensure(char_len(&patient.name) <= PATIENT_NAME_MAX_LEN, "patient name is too long")?;

    if let Some(national_id) = patient.national_id() {
        ensure(
            char_len(national_id) == PATIENT_NATIONAL_ID_LEN,
            "national ID must be exactly 12 characters",
        )?;
    }

    ensure(!too_long(patient.phone(), PATIENT_PHONE_MAX_LEN), "phone number is too long")?;

    if let Some(email) = patient.email() {
        ensure(char_len(email) <= PATIENT_EMAIL_MAX_LEN, "email is too long")?;
        ensure(email.contains('@'), "invalid email format")?;
    }

    ensure(!too_long(patient.address.as_deref(), PATIENT_ADDRESS_MAX_LEN), "address is too long")?;
    ensure(!too_long(patient.notes.as_deref(), PATIENT_NOTES_MAX_LEN), "notes are too long")?;

    Ok(())
}
