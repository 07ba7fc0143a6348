use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::AppointmentStatus;

/// Scheduling slot. The (id, patient_id) pair is the external key used
/// by consultations, reschedules and referrals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub date: NaiveDateTime,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
}
