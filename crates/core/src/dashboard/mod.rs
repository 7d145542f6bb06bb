//! Dashboard counters and the finance report

pub mod service;

pub use service::{build_finance_report, compute_dashboard_stats, DashboardService};
