//! `/api/patients`

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use clinicdesk_domain::Patient;
use serde::Deserialize;

use super::{json_body, parse_id, success, success_without_data, ApiResult, AppState, SuccessBody};

#[derive(Debug, Default, Deserialize)]
pub struct PatientQuery {
    pub query: Option<String>,
}

/// `GET /api/patients?query=` - all patients, or a name/phone search
pub async fn list(
    State(ctx): State<AppState>,
    Query(params): Query<PatientQuery>,
) -> ApiResult<Json<Vec<Patient>>> {
    let patients = match params.query {
        Some(query) => ctx.patients.search_patients(&query).await?,
        None => ctx.patients.get_all_patients().await?,
    };
    Ok(Json(patients))
}

pub async fn create(
    State(ctx): State<AppState>,
    payload: Result<Json<Patient>, JsonRejection>,
) -> ApiResult<Json<SuccessBody<Patient>>> {
    let patient = ctx.patients.create_patient(json_body(payload)?).await?;
    Ok(success("Patient created successfully", patient))
}

pub async fn detail(
    State(ctx): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Patient>> {
    Ok(Json(ctx.patients.get_patient(parse_id(&id)?).await?))
}

/// The id in the path wins over any id in the body.
pub async fn update(
    State(ctx): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Patient>, JsonRejection>,
) -> ApiResult<Json<SuccessBody<Patient>>> {
    let mut patient = json_body(payload)?;
    patient.id = parse_id(&id)?;

    let patient = ctx.patients.update_patient(patient).await?;
    Ok(success("Patient updated successfully", patient))
}

pub async fn remove(
    State(ctx): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessBody<()>>> {
    ctx.patients.delete_patient(parse_id(&id)?).await?;
    Ok(success_without_data("Patient deleted successfully"))
}
