//! End-to-end coverage of the use-case services over the SQLite repositories.
//!
//! Each test runs against an isolated temporary database with migrations
//! applied, so uniqueness, soft delete and the slot index are exercised for
//! real.

use std::sync::Arc;

use chrono::NaiveDate;
use clinicdesk_core::{
    AppointmentService, CatalogService, DashboardService, DoctorService, PatientService,
};
use clinicdesk_domain::{Appointment, AppointmentStatus, ClinicError, Doctor, Patient, Service};
use clinicdesk_infra::{
    Argon2CredentialHasher, DbManager, SqliteAppointmentRepository, SqliteDoctorRepository,
    SqlitePatientRepository, SqliteServiceRepository,
};
use tempfile::TempDir;

struct DbHarness {
    #[allow(dead_code)]
    temp_dir: TempDir,
    patients: PatientService,
    catalog: CatalogService,
    doctors: DoctorService,
    appointments: AppointmentService,
    dashboard: DashboardService,
}

impl DbHarness {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir created");
        let db = Arc::new(
            DbManager::new(temp_dir.path().join("clinicdesk.db"), 4).expect("manager created"),
        );
        db.run_migrations().expect("migrations run");

        let patient_store = Arc::new(SqlitePatientRepository::new(Arc::clone(&db)));
        let appointment_store = Arc::new(SqliteAppointmentRepository::new(Arc::clone(&db)));

        Self {
            patients: PatientService::new(patient_store.clone()),
            catalog: CatalogService::new(Arc::new(SqliteServiceRepository::new(Arc::clone(&db)))),
            doctors: DoctorService::new(
                Arc::new(SqliteDoctorRepository::new(Arc::clone(&db))),
                Arc::new(Argon2CredentialHasher::new()),
            ),
            appointments: AppointmentService::new(appointment_store.clone(), patient_store.clone()),
            dashboard: DashboardService::new(patient_store, appointment_store),
            temp_dir,
        }
    }
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, d).expect("valid date")
}

#[tokio::test]
async fn patient_uniqueness_survives_soft_delete_cycle() {
    let h = DbHarness::new();

    let first = h
        .patients
        .create_patient(Patient::new("Aigerim").with_national_id("123456789012"))
        .await
        .unwrap();
    let duplicate = h
        .patients
        .create_patient(Patient::new("Dana").with_national_id("123456789012"))
        .await
        .unwrap_err();
    assert_eq!(duplicate, ClinicError::conflict("duplicate national ID"));

    h.patients.delete_patient(first.id).await.unwrap();
    assert!(h
        .patients
        .create_patient(Patient::new("Dana").with_national_id("123456789012"))
        .await
        .is_ok());
}

#[tokio::test]
async fn booking_lifecycle_and_reports() {
    let h = DbHarness::new();
    let patient = h.patients.create_patient(Patient::new("Timur")).await.unwrap();

    let a = h
        .appointments
        .create_appointment(
            Appointment::new(patient.id, day(15), "10:00", "Consultation")
                .with_price(1000.0)
                .with_status(AppointmentStatus::Completed),
        )
        .await
        .unwrap();
    assert_eq!(a.status, AppointmentStatus::Scheduled);
    assert_eq!(a.patient_name, "Timur");

    let b = h
        .appointments
        .create_appointment(
            Appointment::new(patient.id, day(16), "10:00", "Cleaning").with_price(2000.0),
        )
        .await
        .unwrap();

    let clash = h
        .appointments
        .create_appointment(Appointment::new(patient.id, day(15), "10:00", "Consultation"))
        .await
        .unwrap_err();
    assert_eq!(clash, ClinicError::conflict("time slot is already occupied"));

    h.appointments.complete_appointment(a.id).await.unwrap();
    h.appointments.complete_appointment(b.id).await.unwrap();

    let report = h.dashboard.get_finance_report().await.unwrap();
    assert!((report.total_income - 3000.0).abs() < f64::EPSILON);
    assert_eq!(report.by_day.len(), 2);
    assert_eq!(report.by_week.len(), 1);
    assert_eq!(report.by_week[0].week, "2025-W03");

    let stats = h.dashboard.get_dashboard_stats_for(day(15)).await.unwrap();
    assert_eq!(stats.completed_appointments, 2);
    assert_eq!(stats.today_appointments, 1);
    assert!((stats.today_revenue - 1000.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn rescheduling_onto_own_slot_is_allowed() {
    let h = DbHarness::new();
    let patient = h.patients.create_patient(Patient::new("Olga")).await.unwrap();

    let mut booked = h
        .appointments
        .create_appointment(Appointment::new(patient.id, day(25), "10:00", "Consultation"))
        .await
        .unwrap();
    booked.notes = Some("bring x-ray".into());

    let saved = h.appointments.update_appointment(booked.clone()).await.unwrap();
    assert_eq!(saved.notes.as_deref(), Some("bring x-ray"));
    assert_eq!(saved.created_at, booked.created_at);
}

#[tokio::test]
async fn appointment_for_unknown_patient_is_rejected() {
    let h = DbHarness::new();

    let err = h
        .appointments
        .create_appointment(Appointment::new(404, day(25), "10:00", "Consultation"))
        .await
        .unwrap_err();

    assert_eq!(err, ClinicError::not_found("patient not found"));
}

#[tokio::test]
async fn doctor_login_with_argon2_credentials() {
    let h = DbHarness::new();

    h.doctors.create_doctor(Doctor::new("Dr. Kim", "kim", "s3cret")).await.unwrap();

    let doctor = h.doctors.authenticate_doctor("kim", "s3cret").await.unwrap();
    assert!(doctor.password.is_empty());
    assert_eq!(
        h.doctors.authenticate_doctor("kim", "wrong").await.unwrap_err(),
        ClinicError::unauthorized("invalid login or password")
    );

    let duplicate = h.doctors.create_doctor(Doctor::new("Other", "kim", "pass")).await.unwrap_err();
    assert!(matches!(duplicate, ClinicError::Database(_)));
}

#[tokio::test]
async fn catalog_search_over_sqlite() {
    let h = DbHarness::new();

    h.catalog
        .create_service(Service::new("Whitening", "Hygiene").with_price(40_000.0))
        .await
        .unwrap();
    h.catalog.create_service(Service::new("Cleaning", "Hygiene")).await.unwrap();
    h.catalog.create_service(Service::new("Crown", "Prosthetics")).await.unwrap();

    assert_eq!(h.catalog.get_services_by_category("Hygiene").await.unwrap().len(), 2);
    assert_eq!(h.catalog.search_services("crown").await.unwrap().len(), 1);
    assert_eq!(h.catalog.search_services("").await.unwrap().len(), 3);
}
