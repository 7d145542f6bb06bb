//! `/api/appointments`

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use clinicdesk_domain::Appointment;
use serde::Deserialize;

use super::{
    json_body, parse_date, parse_id, success, success_without_data, ApiResult, AppState,
    SuccessBody,
};
use crate::error::ApiError;

/// Either a single `date` or an inclusive `from`/`to` range
#[derive(Debug, Default, Deserialize)]
pub struct AppointmentQuery {
    pub date: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

pub async fn list(
    State(ctx): State<AppState>,
    Query(params): Query<AppointmentQuery>,
) -> ApiResult<Json<Vec<Appointment>>> {
    let appointments = match params {
        AppointmentQuery { date: Some(date), .. } => {
            ctx.appointments.get_appointments_by_date(parse_date(&date)?).await?
        }
        AppointmentQuery { from: Some(from), to: Some(to), .. } => {
            ctx.appointments.get_appointments_in_range(parse_date(&from)?, parse_date(&to)?).await?
        }
        AppointmentQuery { from: None, to: None, .. } => {
            ctx.appointments.get_all_appointments().await?
        }
        _ => return Err(ApiError::bad_request("both from and to are required")),
    };
    Ok(Json(appointments))
}

/// `GET /api/patients/{id}/appointments`
pub async fn for_patient(
    State(ctx): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Appointment>>> {
    Ok(Json(ctx.appointments.get_appointments_by_patient(parse_id(&id)?).await?))
}

pub async fn create(
    State(ctx): State<AppState>,
    payload: Result<Json<Appointment>, JsonRejection>,
) -> ApiResult<Json<SuccessBody<Appointment>>> {
    let appointment = ctx.appointments.create_appointment(json_body(payload)?).await?;
    Ok(success("Appointment created successfully", appointment))
}

pub async fn detail(
    State(ctx): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Appointment>> {
    Ok(Json(ctx.appointments.get_appointment(parse_id(&id)?).await?))
}

pub async fn update(
    State(ctx): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Appointment>, JsonRejection>,
) -> ApiResult<Json<SuccessBody<Appointment>>> {
    let mut appointment = json_body(payload)?;
    appointment.id = parse_id(&id)?;

    let appointment = ctx.appointments.update_appointment(appointment).await?;
    Ok(success("Appointment updated successfully", appointment))
}

pub async fn remove(
    State(ctx): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessBody<()>>> {
    ctx.appointments.delete_appointment(parse_id(&id)?).await?;
    Ok(success_without_data("Appointment deleted successfully"))
}

pub async fn complete(
    State(ctx): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessBody<Appointment>>> {
    let appointment = ctx.appointments.complete_appointment(parse_id(&id)?).await?;
    Ok(success("Appointment completed", appointment))
}

pub async fn cancel(
    State(ctx): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessBody<Appointment>>> {
    let appointment = ctx.appointments.cancel_appointment(parse_id(&id)?).await?;
    Ok(success("Appointment cancelled", appointment))
}
