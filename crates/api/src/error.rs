//! HTTP error mapping
//!
//! Every handler returns `Result<_, ApiError>`; the body is always
//! `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use clinicdesk_domain::ClinicError;
use serde::Serialize;
use tracing::error;

const INTERNAL_MESSAGE: &str = "internal server error";

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// A domain error on its way out of a handler
#[derive(Debug)]
pub struct ApiError(pub ClinicError);

impl ApiError {
    /// Malformed request data caught before reaching a service.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(ClinicError::validation(message))
    }

    pub const fn status(&self) -> StatusCode {
        match self.0 {
            ClinicError::Validation(_) => StatusCode::BAD_REQUEST,
            ClinicError::NotFound(_) => StatusCode::NOT_FOUND,
            ClinicError::Conflict(_) => StatusCode::CONFLICT,
            ClinicError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ClinicError::Database(_) | ClinicError::Config(_) | ClinicError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ClinicError> for ApiError {
    fn from(err: ClinicError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(kind = self.0.label(), error = %self.0, "request failed");
            INTERNAL_MESSAGE.to_string()
        } else {
            self.0.message().to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
