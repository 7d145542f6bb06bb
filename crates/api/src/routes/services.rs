//! `/api/services`

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use clinicdesk_domain::Service;
use serde::Deserialize;

use super::{json_body, parse_id, success, success_without_data, ApiResult, AppState, SuccessBody};

#[derive(Debug, Default, Deserialize)]
pub struct ServiceQuery {
    pub category: Option<String>,
    pub query: Option<String>,
}

/// `GET /api/services` - `category` takes precedence over `query`
pub async fn list(
    State(ctx): State<AppState>,
    Query(params): Query<ServiceQuery>,
) -> ApiResult<Json<Vec<Service>>> {
    let services = match (params.category, params.query) {
        (Some(category), _) => ctx.catalog.get_services_by_category(&category).await?,
        (None, Some(query)) => ctx.catalog.search_services(&query).await?,
        (None, None) => ctx.catalog.get_all_services().await?,
    };
    Ok(Json(services))
}

pub async fn create(
    State(ctx): State<AppState>,
    payload: Result<Json<Service>, JsonRejection>,
) -> ApiResult<Json<SuccessBody<Service>>> {
    let service = ctx.catalog.create_service(json_body(payload)?).await?;
    Ok(success("Service created successfully", service))
}

pub async fn detail(
    State(ctx): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Service>> {
    Ok(Json(ctx.catalog.get_service(parse_id(&id)?).await?))
}

pub async fn update(
    State(ctx): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Service>, JsonRejection>,
) -> ApiResult<Json<SuccessBody<Service>>> {
    let mut service = json_body(payload)?;
    service.id = parse_id(&id)?;

    let service = ctx.catalog.update_service(service).await?;
    Ok(success("Service updated successfully", service))
}

pub async fn remove(
    State(ctx): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessBody<()>>> {
    ctx.catalog.delete_service(parse_id(&id)?).await?;
    Ok(success_without_data("Service deleted successfully"))
}
