// libs/scheduling-cell/src/store.rs
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use shared_database::ClinicApiClient;

use crate::models::{Appointment, SchedulingError};

#[derive(Debug, Error)]
#[error("appointment store error: {0}")]
pub struct StoreError(pub String);

impl From<StoreError> for SchedulingError {
    fn from(err: StoreError) -> Self {
        SchedulingError::Store(err.0)
    }
}

/// Read-only query seam between the validator and whatever holds the
/// appointment records. Implementations must return the doctor's full
/// appointment set (active and inactive); status filtering happens in the
/// validator. Pushing the status filter into the query is allowed as long
/// as the result is logically equivalent.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn find_by_doctor(
        &self,
        doctor_id: &str,
        exclude_id: Option<&str>,
    ) -> Result<Vec<Appointment>, StoreError>;
}

/// Production store backed by the clinic records REST service.
pub struct ClinicApiStore {
    client: Arc<ClinicApiClient>,
}

impl ClinicApiStore {
    pub fn new(client: Arc<ClinicApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AppointmentStore for ClinicApiStore {
    async fn find_by_doctor(
        &self,
        doctor_id: &str,
        exclude_id: Option<&str>,
    ) -> Result<Vec<Appointment>, StoreError> {
        let rows = self
            .client
            .fetch_doctor_appointments(doctor_id, exclude_id)
            .await
            .map_err(|e| StoreError(e.to_string()))?;

        rows.into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Appointment>, _>>()
            .map_err(|e| StoreError(format!("Failed to parse appointments: {}", e)))
    }
}
