//! Service catalog

pub mod ports;
pub mod service;
pub mod validation;

pub use ports::ServiceStore;
pub use service::CatalogService;
pub use validation::validate_service;
