//! `/api/doctors`
//!
//! Records leave the service without their password, so nothing here
//! needs to scrub them.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use clinicdesk_domain::Doctor;

use super::{json_body, parse_id, success, success_without_data, ApiResult, AppState, SuccessBody};

pub async fn list(State(ctx): State<AppState>) -> ApiResult<Json<Vec<Doctor>>> {
    Ok(Json(ctx.doctors.get_all_doctors().await?))
}

pub async fn create(
    State(ctx): State<AppState>,
    payload: Result<Json<Doctor>, JsonRejection>,
) -> ApiResult<Json<SuccessBody<Doctor>>> {
    let doctor = ctx.doctors.create_doctor(json_body(payload)?).await?;
    Ok(success("Doctor created successfully", doctor))
}

pub async fn detail(
    State(ctx): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Doctor>> {
    Ok(Json(ctx.doctors.get_doctor(parse_id(&id)?).await?))
}

pub async fn update(
    State(ctx): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Doctor>, JsonRejection>,
) -> ApiResult<Json<SuccessBody<Doctor>>> {
    let mut doctor = json_body(payload)?;
    doctor.id = parse_id(&id)?;

    let doctor = ctx.doctors.update_doctor(doctor).await?;
    Ok(success("Doctor updated successfully", doctor))
}

pub async fn remove(
    State(ctx): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessBody<()>>> {
    ctx.doctors.delete_doctor(parse_id(&id)?).await?;
    Ok(success_without_data("Doctor deleted successfully"))
}
