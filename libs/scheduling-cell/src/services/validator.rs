// libs/scheduling-cell/src/services/validator.rs
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::models::{Appointment, SchedulingError, SchedulingVerdict};
use crate::store::AppointmentStore;
use crate::time::{add_minutes_to_time, date_time_to_absolute_minutes, format_time_for_display};

fn object_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9a-fA-F]{24}$").expect("valid object id pattern"))
}

/// Decides whether a candidate appointment would double-book a doctor.
///
/// Pure read-and-decide: one store round trip, then synchronous interval
/// math. This is a pre-write guard only; two concurrent requests can both
/// pass before either write commits, so a hard no-double-booking guarantee
/// needs an exclusion constraint at the storage layer.
pub struct SchedulingValidator<S: AppointmentStore> {
    store: S,
}

impl<S: AppointmentStore> SchedulingValidator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate a candidate `(date, time, duration)` against a doctor's
    /// active appointments. `exclude_appointment_id` keeps an edited
    /// appointment from conflicting with itself.
    ///
    /// `Ok` carries the verdict either way; a conflict is not an `Err`.
    /// `Err(Validation)` means malformed input (no query was made) and
    /// `Err(Store)` means the check could not be performed at all.
    pub async fn validate_scheduling(
        &self,
        doctor_id: &str,
        date: &str,
        time: &str,
        duration_minutes: i64,
        exclude_appointment_id: Option<&str>,
    ) -> Result<SchedulingVerdict, SchedulingError> {
        if doctor_id.trim().is_empty() {
            return Err(SchedulingError::Validation("Doctor id is required".to_string()));
        }
        if !object_id_pattern().is_match(doctor_id) {
            return Err(SchedulingError::Validation(format!(
                "Doctor id '{}' is not a valid object id",
                doctor_id
            )));
        }

        let candidate_start = date_time_to_absolute_minutes(date, time).ok_or_else(|| {
            SchedulingError::Validation(format!(
                "Invalid appointment date/time '{} {}': expected YYYY-MM-DD and 24-hour HH:MM",
                date, time
            ))
        })?;

        if duration_minutes <= 0 {
            return Err(SchedulingError::Validation(
                "Duration must be a positive number of minutes".to_string(),
            ));
        }
        let candidate_end = candidate_start + duration_minutes;

        debug!(
            "Checking conflicts for doctor {} on {} at {} for {} minutes",
            doctor_id, date, time, duration_minutes
        );

        let appointments = self
            .store
            .find_by_doctor(doctor_id, exclude_appointment_id)
            .await?;

        for appointment in appointments.iter().filter(|a| a.status.is_active()) {
            let Some(existing_start) =
                date_time_to_absolute_minutes(&appointment.date, &appointment.time)
            else {
                warn!(
                    "Skipping appointment {} with malformed date/time '{} {}'",
                    appointment.id, appointment.date, appointment.time
                );
                continue;
            };

            let existing_duration = appointment.effective_duration_minutes();
            let existing_end = existing_start + existing_duration;

            // Half-open intervals: an appointment ending exactly when the
            // candidate starts is not a conflict.
            if candidate_start < existing_end && existing_start < candidate_end {
                warn!(
                    "Conflict for doctor {}: candidate {} {} overlaps appointment {}",
                    doctor_id, date, time, appointment.id
                );
                return Ok(SchedulingVerdict::conflict(conflict_message(
                    appointment,
                    existing_duration,
                )));
            }
        }

        Ok(SchedulingVerdict::valid())
    }
}

/// User-facing message naming the conflicting window. The end time is always
/// computed from the stored appointment's own duration, never assumed.
fn conflict_message(appointment: &Appointment, duration_minutes: i64) -> String {
    let end_time = add_minutes_to_time(&appointment.time, duration_minutes)
        .unwrap_or_else(|| appointment.time.clone());
    let start_display =
        format_time_for_display(&appointment.time).unwrap_or_else(|| appointment.time.clone());
    let end_display = format_time_for_display(&end_time).unwrap_or_else(|| end_time.clone());

    format!(
        "The doctor already has an appointment on {} from {} to {} ({} - {}). Please choose a different time.",
        appointment.date, appointment.time, end_time, start_display, end_display
    )
}
