// libs/scheduling-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use shared_config::AppConfig;
use shared_database::ClinicApiClient;
use shared_models::error::AppError;

use crate::models::{SchedulingError, SchedulingVerdict};
use crate::services::SchedulingValidator;
use crate::store::ClinicApiStore;

// ==============================================================================
// QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct ConflictCheckQuery {
    pub doctor_id: String,
    pub date: String,
    pub time: String,
    pub duration_minutes: Option<i64>,
    pub exclude_appointment_id: Option<String>,
}

// ==============================================================================
// SCHEDULING HANDLERS
// ==============================================================================

/// Check whether a candidate appointment would double-book a doctor.
/// Returns the verdict as-is; a conflict is a 200 with `is_valid: false`.
#[axum::debug_handler]
pub async fn check_scheduling_conflicts(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<ConflictCheckQuery>,
) -> Result<Json<SchedulingVerdict>, AppError> {
    let store = ClinicApiStore::new(Arc::new(ClinicApiClient::new(&state)));
    let validator = SchedulingValidator::new(store);

    // Defaulting the candidate's duration is the caller's job, and this
    // handler is the caller: absent parameter means the standard 30-minute
    // slot. The validator itself never substitutes a candidate default.
    let duration_minutes = query.duration_minutes.unwrap_or(30);

    let verdict = validator
        .validate_scheduling(
            &query.doctor_id,
            &query.date,
            &query.time,
            duration_minutes,
            query.exclude_appointment_id.as_deref(),
        )
        .await
        .map_err(|e| match e {
            SchedulingError::Validation(msg) => AppError::ValidationError(msg),
            SchedulingError::Store(msg) => AppError::UpstreamStore(msg),
        })?;

    Ok(Json(verdict))
}
