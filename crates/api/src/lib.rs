//! # ClinicDesk API
//!
//! HTTP application layer - routes, wiring and the binary entry point.
//!
//! This crate contains:
//! - axum routes (JSON in, JSON out)
//! - Application context (dependency injection, backend selection)
//! - Error mapping and request logging
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Handlers stay thin; every rule lives in `clinicdesk-core`

pub mod context;
pub mod error;
pub mod routes;
pub mod utils;

// Re-export for convenience
pub use context::AppContext;
pub use error::ApiError;
pub use routes::build_router;
