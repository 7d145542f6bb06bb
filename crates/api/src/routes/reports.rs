//! `/api/dashboard` and `/api/reports`

use axum::extract::State;
use axum::Json;
use clinicdesk_domain::{DashboardStats, FinanceReport};

use super::{ApiResult, AppState};

pub async fn dashboard(State(ctx): State<AppState>) -> ApiResult<Json<DashboardStats>> {
    Ok(Json(ctx.dashboard.get_dashboard_stats().await?))
}

pub async fn finance(State(ctx): State<AppState>) -> ApiResult<Json<FinanceReport>> {
    Ok(Json(ctx.dashboard.get_finance_report().await?))
}
