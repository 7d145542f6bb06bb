//! HTTP routes
//!
//! Reads answer the bare JSON value; mutations answer
//! `{"status": "success", "message": ..., "data": ...}`.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use chrono::NaiveDate;
use clinicdesk_domain::constants::DAY_KEY_FORMAT;
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crate::context::AppContext;
use crate::error::ApiError;
use crate::utils::logging::request_logging;

pub mod appointments;
pub mod auth;
pub mod doctors;
pub mod health;
pub mod patients;
pub mod reports;
pub mod services;

/// Shared state handed to every handler
pub type AppState = Arc<AppContext>;

pub type ApiResult<T> = Result<T, ApiError>;

/// Body of a successful mutation
#[derive(Debug, Serialize)]
pub struct SuccessBody<T> {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

pub fn success<T: Serialize>(message: impl Into<String>, data: T) -> Json<SuccessBody<T>> {
    Json(SuccessBody { status: "success", message: message.into(), data: Some(data) })
}

pub fn success_without_data(message: impl Into<String>) -> Json<SuccessBody<()>> {
    Json(SuccessBody { status: "success", message: message.into(), data: None })
}

/// Unwrap a JSON body, answering 400 with the usual error shape on failure.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected request body");
        ApiError::bad_request("invalid JSON")
    })
}

pub(crate) fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.trim().parse().map_err(|_| ApiError::bad_request("invalid ID"))
}

pub(crate) fn parse_date(raw: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DAY_KEY_FORMAT)
        .map_err(|_| ApiError::bad_request("date must be in YYYY-MM-DD format"))
}

/// Build the full application router
pub fn build_router(ctx: AppState) -> Router {
    let api = Router::new()
        .route("/patients", get(patients::list).post(patients::create))
        .route(
            "/patients/{id}",
            get(patients::detail).put(patients::update).delete(patients::remove),
        )
        .route("/patients/{id}/appointments", get(appointments::for_patient))
        .route("/services", get(services::list).post(services::create))
        .route(
            "/services/{id}",
            get(services::detail).put(services::update).delete(services::remove),
        )
        .route("/appointments", get(appointments::list).post(appointments::create))
        .route(
            "/appointments/{id}",
            get(appointments::detail).put(appointments::update).delete(appointments::remove),
        )
        .route("/appointments/{id}/complete", post(appointments::complete))
        .route("/appointments/{id}/cancel", post(appointments::cancel))
        .route("/dashboard", get(reports::dashboard))
        .route("/reports", get(reports::finance))
        .route("/doctors", get(doctors::list).post(doctors::create))
        .route(
            "/doctors/{id}",
            get(doctors::detail).put(doctors::update).delete(doctors::remove),
        )
        .route("/auth", post(auth::login));

    Router::new()
        .nest("/api", api)
        .route("/health", get(health::check))
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}
