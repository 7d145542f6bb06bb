//! Shared helpers for the use-case layer

pub mod validation;
