//! Mock repository implementations for testing
//!
//! Every mock keeps its rows behind a `parking_lot::Mutex`, assigns
//! sequential IDs, counts calls, and can be told to fail the next lookups
//! with a storage error.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use clinicdesk_core::{AppointmentStore, CredentialHasher, DoctorStore, PatientStore, ServiceStore};
use clinicdesk_domain::{Appointment, ClinicError, Doctor, Patient, Result, Service};
use parking_lot::Mutex;

/// Rows plus bookkeeping shared by all mocks.
struct Table<T> {
    rows: Vec<T>,
    next_id: i64,
    calls: usize,
    failure: Option<ClinicError>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self { rows: Vec::new(), next_id: 1, calls: 0, failure: None }
    }
}

impl<T> Table<T> {
    fn touch(&mut self) -> Result<()> {
        self.calls += 1;
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

fn db_down() -> ClinicError {
    ClinicError::Database("connection refused".into())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/* -------------------------------------------------------------------------- */
/* Patients */
/* -------------------------------------------------------------------------- */

#[derive(Default, Clone)]
pub struct MockPatientStore {
    table: Arc<Mutex<Table<Patient>>>,
}

impl MockPatientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed rows directly, bypassing validation.
    pub fn with_patient(self, mut patient: Patient) -> Self {
        {
            let mut table = self.table.lock();
            if patient.id == 0 {
                patient.id = table.next_id;
            }
            table.next_id = table.next_id.max(patient.id + 1);
            table.rows.push(patient);
        }
        self
    }

    /// Make every subsequent call fail with a database error.
    pub fn fail_with_database_error(&self) {
        self.table.lock().failure = Some(db_down());
    }

    pub fn calls(&self) -> usize {
        self.table.lock().calls
    }

    pub fn rows(&self) -> Vec<Patient> {
        self.table.lock().rows.clone()
    }
}

#[async_trait]
impl PatientStore for MockPatientStore {
    async fn get(&self, id: i64) -> Result<Patient> {
        let mut table = self.table.lock();
        table.touch()?;
        table
            .rows
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ClinicError::not_found(format!("patient {id} not found")))
    }

    async fn get_all(&self) -> Result<Vec<Patient>> {
        let mut table = self.table.lock();
        table.touch()?;
        Ok(table.rows.clone())
    }

    async fn create(&self, mut patient: Patient) -> Result<Patient> {
        let mut table = self.table.lock();
        table.touch()?;
        patient.id = table.next_id;
        table.next_id += 1;
        table.rows.push(patient.clone());
        Ok(patient)
    }

    async fn update(&self, patient: Patient) -> Result<Patient> {
        let mut table = self.table.lock();
        table.touch()?;
        let slot = table
            .rows
            .iter_mut()
            .find(|p| p.id == patient.id)
            .ok_or_else(|| ClinicError::not_found(format!("patient {} not found", patient.id)))?;
        *slot = patient.clone();
        Ok(patient)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut table = self.table.lock();
        table.touch()?;
        let before = table.rows.len();
        table.rows.retain(|p| p.id != id);
        if table.rows.len() == before {
            return Err(ClinicError::not_found(format!("patient {id} not found")));
        }
        Ok(())
    }

    async fn get_by_phone(&self, phone: &str) -> Result<Option<Patient>> {
        let mut table = self.table.lock();
        table.touch()?;
        Ok(table.rows.iter().find(|p| p.phone() == Some(phone)).cloned())
    }

    async fn get_by_national_id(&self, national_id: &str) -> Result<Option<Patient>> {
        let mut table = self.table.lock();
        table.touch()?;
        Ok(table.rows.iter().find(|p| p.national_id() == Some(national_id)).cloned())
    }

    async fn search(&self, query: &str) -> Result<Vec<Patient>> {
        let mut table = self.table.lock();
        table.touch()?;
        Ok(table.rows.iter().filter(|p| contains_ci(&p.name, query)).cloned().collect())
    }
}

/* -------------------------------------------------------------------------- */
/* Services */
/* -------------------------------------------------------------------------- */

#[derive(Default, Clone)]
pub struct MockServiceStore {
    table: Arc<Mutex<Table<Service>>>,
}

impl MockServiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service(self, mut service: Service) -> Self {
        {
            let mut table = self.table.lock();
            service.id = table.next_id;
            table.next_id += 1;
            table.rows.push(service);
        }
        self
    }

    pub fn calls(&self) -> usize {
        self.table.lock().calls
    }
}

#[async_trait]
impl ServiceStore for MockServiceStore {
    async fn get(&self, id: i64) -> Result<Service> {
        let mut table = self.table.lock();
        table.touch()?;
        table
            .rows
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| ClinicError::not_found(format!("service {id} not found")))
    }

    async fn get_all(&self) -> Result<Vec<Service>> {
        let mut table = self.table.lock();
        table.touch()?;
        Ok(table.rows.clone())
    }

    async fn create(&self, mut service: Service) -> Result<Service> {
        let mut table = self.table.lock();
        table.touch()?;
        service.id = table.next_id;
        table.next_id += 1;
        table.rows.push(service.clone());
        Ok(service)
    }

    async fn update(&self, service: Service) -> Result<Service> {
        let mut table = self.table.lock();
        table.touch()?;
        let slot = table
            .rows
            .iter_mut()
            .find(|s| s.id == service.id)
            .ok_or_else(|| ClinicError::not_found(format!("service {} not found", service.id)))?;
        *slot = service.clone();
        Ok(service)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut table = self.table.lock();
        table.touch()?;
        let before = table.rows.len();
        table.rows.retain(|s| s.id != id);
        if table.rows.len() == before {
            return Err(ClinicError::not_found(format!("service {id} not found")));
        }
        Ok(())
    }

    async fn get_by_category(&self, category: &str) -> Result<Vec<Service>> {
        let mut table = self.table.lock();
        table.touch()?;
        Ok(table.rows.iter().filter(|s| s.category == category).cloned().collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<Service>> {
        let mut table = self.table.lock();
        table.touch()?;
        Ok(table
            .rows
            .iter()
            .filter(|s| contains_ci(&s.name, query) || contains_ci(&s.category, query))
            .cloned()
            .collect())
    }
}

/* -------------------------------------------------------------------------- */
/* Doctors */
/* -------------------------------------------------------------------------- */

#[derive(Default, Clone)]
pub struct MockDoctorStore {
    table: Arc<Mutex<Table<Doctor>>>,
}

impl MockDoctorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a doctor whose `password` is already a stored credential.
    pub fn with_doctor(self, mut doctor: Doctor) -> Self {
        {
            let mut table = self.table.lock();
            doctor.id = table.next_id;
            table.next_id += 1;
            table.rows.push(doctor);
        }
        self
    }

    pub fn fail_with_database_error(&self) {
        self.table.lock().failure = Some(db_down());
    }

    pub fn rows(&self) -> Vec<Doctor> {
        self.table.lock().rows.clone()
    }
}

#[async_trait]
impl DoctorStore for MockDoctorStore {
    async fn get(&self, id: i64) -> Result<Doctor> {
        let mut table = self.table.lock();
        table.touch()?;
        table
            .rows
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| ClinicError::not_found(format!("doctor {id} not found")))
    }

    async fn get_all(&self) -> Result<Vec<Doctor>> {
        let mut table = self.table.lock();
        table.touch()?;
        Ok(table.rows.clone())
    }

    async fn create(&self, mut doctor: Doctor) -> Result<Doctor> {
        let mut table = self.table.lock();
        table.touch()?;
        if table.rows.iter().any(|d| d.login == doctor.login) {
            return Err(ClinicError::Database("unique constraint violation".into()));
        }
        doctor.id = table.next_id;
        table.next_id += 1;
        table.rows.push(doctor.clone());
        Ok(doctor)
    }

    async fn update(&self, doctor: Doctor) -> Result<Doctor> {
        let mut table = self.table.lock();
        table.touch()?;
        let slot = table
            .rows
            .iter_mut()
            .find(|d| d.id == doctor.id)
            .ok_or_else(|| ClinicError::not_found(format!("doctor {} not found", doctor.id)))?;
        *slot = doctor.clone();
        Ok(doctor)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut table = self.table.lock();
        table.touch()?;
        let before = table.rows.len();
        table.rows.retain(|d| d.id != id);
        if table.rows.len() == before {
            return Err(ClinicError::not_found(format!("doctor {id} not found")));
        }
        Ok(())
    }

    async fn get_by_login(&self, login: &str) -> Result<Option<Doctor>> {
        let mut table = self.table.lock();
        table.touch()?;
        Ok(table.rows.iter().find(|d| d.login == login).cloned())
    }
}

/// Reversible "hash" so tests can assert on stored credentials.
#[derive(Default, Clone, Copy)]
pub struct FakeHasher;

impl FakeHasher {
    pub fn credential(password: &str) -> String {
        format!("hashed:{password}")
    }
}

#[async_trait]
impl CredentialHasher for FakeHasher {
    async fn hash(&self, password: &str) -> Result<String> {
        Ok(Self::credential(password))
    }

    async fn verify(&self, password: &str, credential: &str) -> Result<bool> {
        Ok(credential == Self::credential(password))
    }
}

/* -------------------------------------------------------------------------- */
/* Appointments */
/* -------------------------------------------------------------------------- */

/// Enforces the one-appointment-per-slot rule on create and update, the way
/// the real stores do.
#[derive(Default, Clone)]
pub struct MockAppointmentStore {
    table: Arc<Mutex<Table<Appointment>>>,
}

impl MockAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_appointment(self, mut appointment: Appointment) -> Self {
        {
            let mut table = self.table.lock();
            appointment.id = table.next_id;
            table.next_id += 1;
            table.rows.push(appointment);
        }
        self
    }

    pub fn rows(&self) -> Vec<Appointment> {
        self.table.lock().rows.clone()
    }

    pub fn calls(&self) -> usize {
        self.table.lock().calls
    }
}

fn slot_taken(rows: &[Appointment], candidate: &Appointment) -> bool {
    candidate.date.is_some_and(|date| {
        rows.iter().any(|a| a.id != candidate.id && a.occupies(date, &candidate.time))
    })
}

#[async_trait]
impl AppointmentStore for MockAppointmentStore {
    async fn get(&self, id: i64) -> Result<Appointment> {
        let mut table = self.table.lock();
        table.touch()?;
        table
            .rows
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| ClinicError::not_found(format!("appointment {id} not found")))
    }

    async fn get_all(&self) -> Result<Vec<Appointment>> {
        let mut table = self.table.lock();
        table.touch()?;
        Ok(table.rows.clone())
    }

    async fn create(&self, mut appointment: Appointment) -> Result<Appointment> {
        let mut table = self.table.lock();
        table.touch()?;
        appointment.id = table.next_id;
        if slot_taken(&table.rows, &appointment) {
            return Err(ClinicError::conflict("time slot is already occupied"));
        }
        table.next_id += 1;
        table.rows.push(appointment.clone());
        Ok(appointment)
    }

    async fn update(&self, appointment: Appointment) -> Result<Appointment> {
        let mut table = self.table.lock();
        table.touch()?;
        if slot_taken(&table.rows, &appointment) {
            return Err(ClinicError::conflict("time slot is already occupied"));
        }
        let slot = table.rows.iter_mut().find(|a| a.id == appointment.id).ok_or_else(|| {
            ClinicError::not_found(format!("appointment {} not found", appointment.id))
        })?;
        *slot = appointment.clone();
        Ok(appointment)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut table = self.table.lock();
        table.touch()?;
        let before = table.rows.len();
        table.rows.retain(|a| a.id != id);
        if table.rows.len() == before {
            return Err(ClinicError::not_found(format!("appointment {id} not found")));
        }
        Ok(())
    }

    async fn get_by_patient_id(&self, patient_id: i64) -> Result<Vec<Appointment>> {
        let mut table = self.table.lock();
        table.touch()?;
        Ok(table.rows.iter().filter(|a| a.patient_id == patient_id).cloned().collect())
    }

    async fn get_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>> {
        let mut table = self.table.lock();
        table.touch()?;
        Ok(table.rows.iter().filter(|a| a.date == Some(date)).cloned().collect())
    }

    async fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Appointment>> {
        let mut table = self.table.lock();
        table.touch()?;
        Ok(table
            .rows
            .iter()
            .filter(|a| a.date.is_some_and(|d| d >= start && d <= end))
            .cloned()
            .collect())
    }

    async fn check_time_conflict(
        &self,
        date: NaiveDate,
        time: &str,
        exclude_id: i64,
    ) -> Result<bool> {
        let mut table = self.table.lock();
        table.touch()?;
        Ok(table.rows.iter().any(|a| a.id != exclude_id && a.occupies(date, time)))
    }
}
