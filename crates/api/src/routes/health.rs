//! `GET /health`

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::AppState;
use crate::utils::health::HealthStatus;

/// 200 when storage answers, 503 otherwise; the body is the full status.
pub async fn check(State(ctx): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let status = ctx.health_check().await;
    let code = if status.is_healthy { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (code, Json(status))
}
