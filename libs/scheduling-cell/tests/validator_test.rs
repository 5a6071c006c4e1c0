use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use assert_matches::assert_matches;
use async_trait::async_trait;

use scheduling_cell::models::{Appointment, AppointmentStatus, SchedulingError};
use scheduling_cell::services::SchedulingValidator;
use scheduling_cell::store::{AppointmentStore, StoreError};

const DOCTOR_ID: &str = "64b0c4f2a9d3e8f1b2c3d4e5";

struct InMemoryStore {
    appointments: Vec<Appointment>,
    query_count: Arc<AtomicUsize>,
}

impl InMemoryStore {
    fn new(appointments: Vec<Appointment>) -> Self {
        Self {
            appointments,
            query_count: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl AppointmentStore for InMemoryStore {
    async fn find_by_doctor(
        &self,
        doctor_id: &str,
        exclude_id: Option<&str>,
    ) -> Result<Vec<Appointment>, StoreError> {
        self.query_count.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .appointments
            .iter()
            .filter(|a| a.doctor_id == doctor_id && Some(a.id.as_str()) != exclude_id)
            .cloned()
            .collect())
    }
}

struct FailingStore;

#[async_trait]
impl AppointmentStore for FailingStore {
    async fn find_by_doctor(
        &self,
        _doctor_id: &str,
        _exclude_id: Option<&str>,
    ) -> Result<Vec<Appointment>, StoreError> {
        Err(StoreError("connection refused".to_string()))
    }
}

fn appointment(
    id: &str,
    date: &str,
    time: &str,
    duration_minutes: Option<i64>,
    status: AppointmentStatus,
) -> Appointment {
    Appointment {
        id: id.to_string(),
        doctor_id: DOCTOR_ID.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        duration_minutes,
        status,
    }
}

#[tokio::test]
async fn overlapping_appointment_is_rejected_with_window_message() {
    let store = InMemoryStore::new(vec![appointment(
        "a1",
        "2024-03-05",
        "10:00",
        Some(30),
        AppointmentStatus::Confirmed,
    )]);
    let validator = SchedulingValidator::new(store);

    let verdict = validator
        .validate_scheduling(DOCTOR_ID, "2024-03-05", "10:15", 30, None)
        .await
        .unwrap();

    assert!(!verdict.is_valid);
    let message = verdict.error.expect("conflict message");
    assert!(message.contains("2024-03-05"), "message: {}", message);
    assert!(message.contains("10:00"), "message: {}", message);
    assert!(message.contains("10:30"), "message: {}", message);
}

#[tokio::test]
async fn overlap_is_symmetric() {
    // Either leg of an overlapping pair must be rejected against the other.
    let first = appointment("a1", "2024-03-05", "09:00", Some(60), AppointmentStatus::Pending);
    let second = appointment("a2", "2024-03-05", "09:45", Some(60), AppointmentStatus::Confirmed);

    let validator = SchedulingValidator::new(InMemoryStore::new(vec![second.clone()]));
    let verdict = validator
        .validate_scheduling(DOCTOR_ID, &first.date, &first.time, 60, Some(&first.id))
        .await
        .unwrap();
    assert!(!verdict.is_valid);

    let validator = SchedulingValidator::new(InMemoryStore::new(vec![first]));
    let verdict = validator
        .validate_scheduling(DOCTOR_ID, &second.date, &second.time, 60, Some(&second.id))
        .await
        .unwrap();
    assert!(!verdict.is_valid);
}

#[tokio::test]
async fn touching_endpoints_do_not_conflict() {
    let store = InMemoryStore::new(vec![appointment(
        "a1",
        "2024-03-05",
        "10:00",
        Some(30),
        AppointmentStatus::Confirmed,
    )]);
    let validator = SchedulingValidator::new(store);

    // Starts exactly when the existing appointment ends.
    let verdict = validator
        .validate_scheduling(DOCTOR_ID, "2024-03-05", "10:30", 30, None)
        .await
        .unwrap();
    assert!(verdict.is_valid);

    // Ends exactly when the existing appointment starts.
    let verdict = validator
        .validate_scheduling(DOCTOR_ID, "2024-03-05", "09:30", 30, None)
        .await
        .unwrap();
    assert!(verdict.is_valid);
}

#[tokio::test]
async fn inactive_appointments_never_block() {
    let store = InMemoryStore::new(vec![
        appointment("a1", "2024-03-05", "10:00", Some(30), AppointmentStatus::Cancelled),
        appointment("a2", "2024-03-05", "10:00", Some(30), AppointmentStatus::Closed),
        appointment("a3", "2024-03-05", "10:00", Some(30), AppointmentStatus::Completed),
    ]);
    let validator = SchedulingValidator::new(store);

    let verdict = validator
        .validate_scheduling(DOCTOR_ID, "2024-03-05", "10:15", 30, None)
        .await
        .unwrap();

    assert!(verdict.is_valid);
}

#[tokio::test]
async fn editing_an_appointment_does_not_conflict_with_itself() {
    let existing = appointment("a1", "2024-03-05", "10:00", Some(30), AppointmentStatus::Confirmed);
    let validator = SchedulingValidator::new(InMemoryStore::new(vec![existing.clone()]));

    // Re-validating the unchanged slot with its own id excluded.
    let verdict = validator
        .validate_scheduling(
            DOCTOR_ID,
            &existing.date,
            &existing.time,
            30,
            Some(&existing.id),
        )
        .await
        .unwrap();

    assert!(verdict.is_valid);
}

#[tokio::test]
async fn appointments_spanning_midnight_block_the_next_day() {
    // 23:30 + 60 minutes occupies 2024-01-02 until 00:30.
    let store = InMemoryStore::new(vec![appointment(
        "a1",
        "2024-01-01",
        "23:30",
        Some(60),
        AppointmentStatus::Confirmed,
    )]);
    let validator = SchedulingValidator::new(store);

    let verdict = validator
        .validate_scheduling(DOCTOR_ID, "2024-01-02", "00:15", 30, None)
        .await
        .unwrap();
    assert!(!verdict.is_valid);

    let verdict = validator
        .validate_scheduling(DOCTOR_ID, "2024-01-02", "00:30", 30, None)
        .await
        .unwrap();
    assert!(verdict.is_valid);
}

#[tokio::test]
async fn stored_appointment_without_duration_counts_as_thirty_minutes() {
    let store = InMemoryStore::new(vec![appointment(
        "a1",
        "2024-03-05",
        "10:00",
        None,
        AppointmentStatus::Confirmed,
    )]);
    let validator = SchedulingValidator::new(store);

    let verdict = validator
        .validate_scheduling(DOCTOR_ID, "2024-03-05", "10:20", 30, None)
        .await
        .unwrap();
    assert!(!verdict.is_valid);
    assert!(verdict.error.unwrap().contains("10:30"));

    let verdict = validator
        .validate_scheduling(DOCTOR_ID, "2024-03-05", "10:30", 30, None)
        .await
        .unwrap();
    assert!(verdict.is_valid);
}

#[tokio::test]
async fn missing_doctor_id_fails_before_any_query() {
    let store = InMemoryStore::new(vec![]);
    let queries = Arc::clone(&store.query_count);
    let validator = SchedulingValidator::new(store);

    let result = validator
        .validate_scheduling("", "2024-01-01", "09:00", 30, None)
        .await;

    assert_matches!(result, Err(SchedulingError::Validation(_)));
    assert_eq!(queries.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_doctor_id_fails_before_any_query() {
    let store = InMemoryStore::new(vec![]);
    let queries = Arc::clone(&store.query_count);
    let validator = SchedulingValidator::new(store);

    let result = validator
        .validate_scheduling("not-an-object-id", "2024-01-01", "09:00", 30, None)
        .await;

    assert_matches!(result, Err(SchedulingError::Validation(_)));
    assert_eq!(queries.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_candidate_time_is_a_validation_error() {
    let validator = SchedulingValidator::new(InMemoryStore::new(vec![]));

    let result = validator
        .validate_scheduling(DOCTOR_ID, "2024-01-01", "25:00", 30, None)
        .await;
    assert_matches!(result, Err(SchedulingError::Validation(_)));

    let result = validator
        .validate_scheduling(DOCTOR_ID, "2024-13-01", "09:00", 30, None)
        .await;
    assert_matches!(result, Err(SchedulingError::Validation(_)));
}

#[tokio::test]
async fn non_positive_duration_is_a_validation_error() {
    let validator = SchedulingValidator::new(InMemoryStore::new(vec![]));

    let result = validator
        .validate_scheduling(DOCTOR_ID, "2024-01-01", "09:00", 0, None)
        .await;

    assert_matches!(result, Err(SchedulingError::Validation(_)));
}

#[tokio::test]
async fn store_failure_is_distinguishable_from_a_conflict() {
    let validator = SchedulingValidator::new(FailingStore);

    let result = validator
        .validate_scheduling(DOCTOR_ID, "2024-01-01", "09:00", 30, None)
        .await;

    // "Couldn't check" must never read as "no conflict".
    assert_matches!(result, Err(SchedulingError::Store(_)));
}

#[tokio::test]
async fn other_doctors_appointments_are_ignored() {
    let mut other = appointment("a1", "2024-03-05", "10:00", Some(30), AppointmentStatus::Confirmed);
    other.doctor_id = "aaaaaaaaaaaaaaaaaaaaaaaa".to_string();

    let validator = SchedulingValidator::new(InMemoryStore::new(vec![other]));

    let verdict = validator
        .validate_scheduling(DOCTOR_ID, "2024-03-05", "10:15", 30, None)
        .await
        .unwrap();

    assert!(verdict.is_valid);
}
