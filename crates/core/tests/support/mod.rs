//! Shared test helpers for `clinicdesk-core` integration tests.
//!
//! Lightweight in-memory stores with call counters and injectable failures so
//! the service tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod repositories;

use chrono::NaiveDate;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}
