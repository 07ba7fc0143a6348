use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Immutable log entry linking a superseded appointment to its
/// replacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reschedule {
    pub id: i64,
    pub old_appointment_id: i64,
    pub old_patient_id: i64,
    pub new_appointment_id: i64,
    pub new_patient_id: i64,
    pub reason: Option<String>,
    pub reschedule_date: NaiveDate,
    pub requested_by: Option<String>,
}
