//! Dashboard and finance report types

use serde::{Deserialize, Serialize};

/* -------------------------------------------------------------------------- */
/* Dashboard */
/* -------------------------------------------------------------------------- */

/// Summary counters for the dashboard
///
/// "Today" is the current UTC calendar day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_patients: usize,
    pub total_appointments: usize,
    /// Appointments with status `completed`.
    pub completed_appointments: usize,
    /// Appointments still `scheduled`.
    pub pending_appointments: usize,
    /// Appointments dated today, any status.
    pub today_appointments: usize,
    /// Sum of prices of completed appointments.
    pub total_revenue: f64,
    /// Sum of prices of completed appointments dated today.
    pub today_revenue: f64,
}

/* -------------------------------------------------------------------------- */
/* Finance */
/* -------------------------------------------------------------------------- */

/// Income from completed appointments, bucketed by day and ISO week
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinanceReport {
    pub total_income: f64,
    pub by_day: Vec<DayIncome>,
    pub by_week: Vec<WeekIncome>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayIncome {
    /// `YYYY-MM-DD`
    pub date: String,
    pub income: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekIncome {
    /// ISO week key, `YYYY-Www`
    pub week: String,
    pub income: f64,
}
