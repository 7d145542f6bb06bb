//! Demo data for local runs
//!
//! Seeded through the core services so every record passes the same
//! validation, hashing and slot rules as real input. Nothing here is global:
//! the caller decides whether to seed and which stores receive the rows.

use chrono::{Duration, NaiveDate};
use clinicdesk_core::{AppointmentService, CatalogService, DoctorService, PatientService};
use clinicdesk_domain::{Appointment, Doctor, Patient, Result, Service};
use tracing::{info, warn};

/// Login of the seeded administrator account.
pub const DEMO_DOCTOR_LOGIN: &str = "admin";
/// Password of the seeded administrator account.
pub const DEMO_DOCTOR_PASSWORD: &str = "admin123";

/// Counts of records written by [`seed_demo_data`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub patients: usize,
    pub services: usize,
    pub doctors: usize,
    pub appointments: usize,
}

/// Services the fixtures need, borrowed from the application context
pub struct Seeder<'a> {
    pub patients: &'a PatientService,
    pub catalog: &'a CatalogService,
    pub doctors: &'a DoctorService,
    pub appointments: &'a AppointmentService,
}

fn demo_patients() -> Vec<Patient> {
    let mut aigerim = Patient::new("Aigerim Seitkali")
        .with_phone("+7 (701) 555-01-10")
        .with_national_id("920314450123")
        .with_email("aigerim.s@example.kz");
    aigerim.birth_date = NaiveDate::from_ymd_opt(1992, 3, 14);

    let mut timur = Patient::new("Timur Akhmetov").with_phone("+7 (702) 555-02-20");
    timur.birth_date = NaiveDate::from_ymd_opt(1985, 11, 2);
    timur.notes = Some("Allergic to lidocaine".to_string());

    let mut olga = Patient::new("Olga Kim").with_phone("+7 (705) 555-03-30");
    olga.address = Some("Almaty, Abay Ave 10".to_string());

    vec![aigerim, timur, olga]
}

fn demo_services() -> Vec<Service> {
    [
        ("Consultation", "Therapy", 5_000.0, 30),
        ("Caries treatment", "Therapy", 15_000.0, 60),
        ("Root canal treatment", "Endodontics", 35_000.0, 90),
        ("Professional cleaning", "Hygiene", 12_000.0, 45),
        ("Whitening", "Hygiene", 40_000.0, 60),
        ("Tooth extraction", "Surgery", 10_000.0, 30),
        ("Implant placement", "Surgery", 250_000.0, 120),
        ("Crown", "Prosthetics", 80_000.0, 60),
    ]
    .into_iter()
    .map(|(name, category, price, minutes)| {
        Service::new(name, category).with_price(price).with_duration(minutes)
    })
    .collect()
}

impl Seeder<'_> {
    /// Write the demo records unless patients already exist.
    ///
    /// Appointments are placed around `today`; the one in the past is
    /// completed so the dashboard has revenue to show.
    pub async fn seed_demo_data(&self, today: NaiveDate) -> Result<SeedSummary> {
        if !self.patients.get_all_patients().await?.is_empty() {
            info!("storage already holds patients, skipping demo data");
            return Ok(SeedSummary::default());
        }

        let mut summary = SeedSummary::default();

        let mut patients = Vec::new();
        for patient in demo_patients() {
            patients.push(self.patients.create_patient(patient).await?);
            summary.patients += 1;
        }

        for service in demo_services() {
            self.catalog.create_service(service).await?;
            summary.services += 1;
        }

        let mut admin = Doctor::new("Dr. Askar Nurpeisov", DEMO_DOCTOR_LOGIN, DEMO_DOCTOR_PASSWORD);
        admin.email = Some("askar.n@example.kz".to_string());
        admin.is_admin = true;
        let admin = self.doctors.create_doctor(admin).await?;
        summary.doctors += 1;
        warn!(
            login = DEMO_DOCTOR_LOGIN,
            "demo administrator account created with a default password"
        );

        let bookings = [
            (0, -1, "09:00", "Professional cleaning", 12_000.0, true),
            (1, 0, "10:00", "Consultation", 5_000.0, false),
            (2, 0, "14:30", "Caries treatment", 15_000.0, false),
            (0, 2, "11:00", "Root canal treatment", 35_000.0, false),
        ];
        for (patient_index, day_offset, time, service, price, completed) in bookings {
            let mut appointment = Appointment::new(
                patients[patient_index].id,
                today + Duration::days(day_offset),
                time,
                service,
            )
            .with_price(price)
            .with_doctor(admin.name.clone());
            appointment.duration_minutes = 30;

            let booked = self.appointments.create_appointment(appointment).await?;
            if completed {
                self.appointments.complete_appointment(booked.id).await?;
            }
            summary.appointments += 1;
        }

        info!(
            patients = summary.patients,
            services = summary.services,
            appointments = summary.appointments,
            "demo data seeded"
        );
        Ok(summary)
    }
}
