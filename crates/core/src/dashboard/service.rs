//! Dashboard service - read-only aggregation over patients and appointments

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use clinicdesk_domain::constants::DAY_KEY_FORMAT;
use clinicdesk_domain::{
    Appointment, AppointmentStatus, DashboardStats, DayIncome, FinanceReport, Result, WeekIncome,
};
use tracing::debug;

use crate::appointments::ports::AppointmentStore;
use crate::patients::ports::PatientStore;

/// Dashboard service
pub struct DashboardService {
    patients: Arc<dyn PatientStore>,
    appointments: Arc<dyn AppointmentStore>,
}

impl DashboardService {
    pub fn new(patients: Arc<dyn PatientStore>, appointments: Arc<dyn AppointmentStore>) -> Self {
        Self { patients, appointments }
    }

    /// Counters for the current UTC day
    pub async fn get_dashboard_stats(&self) -> Result<DashboardStats> {
        let today = Utc::now().date_naive();
        self.get_dashboard_stats_for(today).await
    }

    /// Counters with an explicit notion of "today"
    pub async fn get_dashboard_stats_for(&self, today: NaiveDate) -> Result<DashboardStats> {
        let patients = self.patients.get_all().await?;
        let appointments = self.appointments.get_all().await?;
        debug!(
            patients = patients.len(),
            appointments = appointments.len(),
            "aggregating dashboard"
        );
        Ok(compute_dashboard_stats(patients.len(), &appointments, today))
    }

    pub async fn get_finance_report(&self) -> Result<FinanceReport> {
        let appointments = self.appointments.get_all().await?;
        Ok(build_finance_report(&appointments))
    }
}

/// Fold appointments into dashboard counters.
pub fn compute_dashboard_stats(
    total_patients: usize,
    appointments: &[Appointment],
    today: NaiveDate,
) -> DashboardStats {
    let mut stats = DashboardStats {
        total_patients,
        total_appointments: appointments.len(),
        ..DashboardStats::default()
    };

    for appointment in appointments {
        let is_today = appointment.date == Some(today);
        if is_today {
            stats.today_appointments += 1;
        }

        match appointment.status {
            AppointmentStatus::Completed => {
                stats.completed_appointments += 1;
                stats.total_revenue += appointment.price;
                if is_today {
                    stats.today_revenue += appointment.price;
                }
            }
            AppointmentStatus::Scheduled => stats.pending_appointments += 1,
            AppointmentStatus::Cancelled => {}
        }
    }

    stats
}

/// Sum completed income by day and by ISO week, buckets sorted by key.
pub fn build_finance_report(appointments: &[Appointment]) -> FinanceReport {
    let mut total_income = 0.0;
    let mut by_day: BTreeMap<String, f64> = BTreeMap::new();
    let mut by_week: BTreeMap<String, f64> = BTreeMap::new();

    for appointment in appointments.iter().filter(|a| a.status == AppointmentStatus::Completed) {
        total_income += appointment.price;

        // Undated rows still count toward the total
        let Some(date) = appointment.date else { continue };
        *by_day.entry(date.format(DAY_KEY_FORMAT).to_string()).or_default() += appointment.price;
        *by_week.entry(iso_week_key(date)).or_default() += appointment.price;
    }

    FinanceReport {
        total_income,
        by_day: by_day.into_iter().map(|(date, income)| DayIncome { date, income }).collect(),
        by_week: by_week.into_iter().map(|(week, income)| WeekIncome { week, income }).collect(),
    }
}

/// `YYYY-Www` using the ISO week-numbering year.
pub fn iso_week_key(date: NaiveDate) -> String {
    let week = date.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}
