//! Integration tests for patient management

mod support;

use std::sync::Arc;

use clinicdesk_core::PatientService;
use clinicdesk_domain::{ClinicError, Patient};
use support::repositories::MockPatientStore;

fn service(store: &MockPatientStore) -> PatientService {
    PatientService::new(Arc::new(store.clone()))
}

#[tokio::test]
async fn blank_name_fails_before_touching_storage() {
    let store = MockPatientStore::new();
    let patients = service(&store);

    for name in ["", "  ", "\t"] {
        let err = patients.create_patient(Patient::new(name)).await.unwrap_err();
        assert!(matches!(&err, ClinicError::Validation(msg) if msg.contains("name is required")));
    }
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn duplicate_national_id_round_trip() {
    // Arrange
    let store = MockPatientStore::new();
    let patients = service(&store);

    // Act
    let first = patients
        .create_patient(Patient::new("Aigerim Bekova").with_national_id("123456789012"))
        .await
        .unwrap();
    let duplicate = patients
        .create_patient(Patient::new("Dana Bekova").with_national_id("123456789012"))
        .await;
    let third = patients
        .create_patient(Patient::new("Dana Bekova").with_national_id("210987654321"))
        .await;

    // Assert
    assert_eq!(first.id, 1);
    assert!(first.created_at.is_some() && first.updated_at.is_some());
    assert_eq!(duplicate.unwrap_err(), ClinicError::conflict("duplicate national ID"));
    assert!(third.is_ok());
    assert_eq!(store.rows().len(), 2);
}

#[tokio::test]
async fn national_id_is_checked_before_phone() {
    let store = MockPatientStore::new()
        .with_patient(
            Patient::new("A").with_phone("+77010000001").with_national_id("111111111111"),
        );
    let patients = service(&store);

    let err = patients
        .create_patient(
            Patient::new("B").with_phone("+77010000001").with_national_id("111111111111"),
        )
        .await
        .unwrap_err();
    assert_eq!(err.message(), "duplicate national ID");

    let err = patients
        .create_patient(Patient::new("B").with_phone("+77010000001"))
        .await
        .unwrap_err();
    assert_eq!(err, ClinicError::conflict("duplicate phone"));
}

#[tokio::test]
async fn update_only_conflicts_with_other_patients() {
    let store = MockPatientStore::new()
        .with_patient(Patient::new("A").with_phone("+77010000001"))
        .with_patient(Patient::new("B").with_phone("+77010000002"));
    let patients = service(&store);

    let mut own = store.rows()[0].clone();
    own.name = "A renamed".into();
    let updated = patients.update_patient(own).await.unwrap();
    assert_eq!(updated.name, "A renamed");
    assert!(updated.updated_at.is_some());

    let mut stealing = store.rows()[1].clone();
    stealing.phone = Some("+77010000001".into());
    assert_eq!(
        patients.update_patient(stealing).await.unwrap_err(),
        ClinicError::conflict("duplicate phone")
    );
}

#[tokio::test]
async fn update_of_missing_patient_is_not_found() {
    let store = MockPatientStore::new();
    let mut ghost = Patient::new("Ghost");
    ghost.id = 42;

    let err = service(&store).update_patient(ghost).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn lookup_failures_propagate_instead_of_passing_uniqueness() {
    let store = MockPatientStore::new();
    store.fail_with_database_error();

    let err = service(&store)
        .create_patient(Patient::new("A").with_phone("+77010000001"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClinicError::Database(_)));
}

#[tokio::test]
async fn id_guard_on_get_and_delete() {
    let store = MockPatientStore::new();
    let patients = service(&store);

    let invalid = ClinicError::validation("invalid patient ID");
    assert_eq!(patients.get_patient(0).await.unwrap_err(), invalid);
    assert_eq!(patients.delete_patient(-1).await.unwrap_err(), invalid);
    assert!(patients.delete_patient(7).await.unwrap_err().is_not_found());
    assert_eq!(store.calls(), 1);
}

#[tokio::test]
async fn blank_search_lists_everyone() {
    let store = MockPatientStore::new()
        .with_patient(Patient::new("Aliya"))
        .with_patient(Patient::new("Marat"));
    let patients = service(&store);

    assert_eq!(patients.search_patients("  ").await.unwrap().len(), 2);
    let found = patients.search_patients("mar").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Marat");
}
