//! In-memory stores
//!
//! Process-local implementations of the core store ports. Each store keeps
//! its rows behind a `parking_lot::RwLock` and assigns sequential IDs; all
//! uniqueness rules are checked and applied under the same write lock.

pub mod appointments;
pub mod doctors;
pub mod patients;
pub mod services;

pub use appointments::InMemoryAppointmentStore;
pub use doctors::InMemoryDoctorStore;
pub use patients::InMemoryPatientStore;
pub use services::InMemoryServiceStore;

/// Rows in insertion order plus the next ID to hand out.
#[derive(Debug)]
pub(crate) struct Table<T> {
    pub rows: Vec<T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self { rows: Vec::new(), next_id: 1 }
    }
}

impl<T> Table<T> {
    pub fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

pub(crate) fn contains_ignore_case(value: &str, needle_lower: &str) -> bool {
    value.to_lowercase().contains(needle_lower)
}
