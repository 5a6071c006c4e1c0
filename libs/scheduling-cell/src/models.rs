// libs/scheduling-cell/src/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// An appointment as stored by the clinic records service. Dates and times are
/// kept as the store's plain strings (`YYYY-MM-DD`, 24-hour `HH:MM`, no
/// timezone); all interval math happens in absolute minutes, see `time`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub doctor_id: String,
    pub date: String,
    pub time: String,
    pub duration_minutes: Option<i64>,
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Duration used when computing this stored appointment's end time.
    /// Legacy records may lack a duration or carry a non-positive one; those
    /// count as 30 minutes. Candidates never go through this defaulting.
    pub fn effective_duration_minutes(&self) -> i64 {
        self.duration_minutes.filter(|d| *d > 0).unwrap_or(30)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Closed,
}

impl AppointmentStatus {
    /// Active appointments occupy schedule time and can conflict; cancelled,
    /// closed and completed ones never do.
    pub fn is_active(&self) -> bool {
        matches!(self, AppointmentStatus::Pending | AppointmentStatus::Confirmed)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Closed => write!(f, "closed"),
        }
    }
}

// ==============================================================================
// VALIDATION RESULT MODELS
// ==============================================================================

/// Outcome of a scheduling check. A conflict is a normal negative verdict,
/// not an error; `error` carries the user-facing conflicting-window message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingVerdict {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SchedulingVerdict {
    pub fn valid() -> Self {
        Self { is_valid: true, error: None }
    }

    pub fn conflict(message: String) -> Self {
        Self { is_valid: false, error: Some(message) }
    }
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

/// Failures of the check itself, distinct from a conflict verdict. Callers
/// must treat `Store` as "unable to determine", never as "no conflict".
#[derive(Debug, Clone, thiserror::Error)]
pub enum SchedulingError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Appointment store error: {0}")]
    Store(String),
}
