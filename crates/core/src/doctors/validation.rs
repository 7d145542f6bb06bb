//! Doctor field rules

use clinicdesk_domain::constants::{
    DOCTOR_LOGIN_MAX_LEN, DOCTOR_NAME_MAX_LEN, DOCTOR_PASSWORD_MIN_LEN,
};
use clinicdesk_domain::{Doctor, Result};

use crate::utils::validation::{char_len, ensure, is_blank};

pub fn validate_doctor(doctor: &Doctor) -> Result<()> {
    ensure(!is_blank(&doctor.name), "doctor name is required")?;
    ensure(char_len(&doctor.name) <= DOCTOR_NAME_MAX_LEN, "doctor name is too long")?;

    ensure(!is_blank(&doctor.login), "doctor login is required")?;
    ensure(char_len(&doctor.login) <= DOCTOR_LOGIN_MAX_LEN, "doctor login is too long")?;

    ensure(!is_blank(&doctor.password), "doctor password is required")?;
    ensure(
        char_len(&doctor.password) >= DOCTOR_PASSWORD_MIN_LEN,
        "doctor password is too short",
    )?;

    Ok(())
}
