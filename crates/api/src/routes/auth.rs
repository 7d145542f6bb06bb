//! `POST /api/auth`

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use clinicdesk_domain::Doctor;
use serde::Deserialize;

use super::{json_body, success, ApiResult, AppState, SuccessBody};

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login(
    State(ctx): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<SuccessBody<Doctor>>> {
    let request = json_body(payload)?;
    let doctor = ctx.doctors.authenticate_doctor(&request.login, &request.password).await?;
    Ok(success("Authentication successful", doctor))
}
