//! Tracing setup and per-request logging

use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use clinicdesk_domain::LoggingConfig;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level. Calling this twice is harmless;
/// the second install is ignored.
pub fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    let installed =
        if config.json { builder.json().try_init() } else { builder.try_init() };

    if installed.is_err() {
        warn!("tracing subscriber already installed");
    }
}

/// Log the outcome of one request with structured fields.
///
/// Server errors log at `warn`; everything else at `info`.
#[inline]
pub fn log_request(method: &str, path: &str, status: u16, elapsed: Duration) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    if status >= 500 {
        warn!(method, path, status, duration_ms, "request_failed");
    } else {
        info!(method, path, status, duration_ms, "request_completed");
    }
}

/// Middleware for `axum::middleware::from_fn`.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    log_request(&method, &path, response.status().as_u16(), start.elapsed());
    response
}
