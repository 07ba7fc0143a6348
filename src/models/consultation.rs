use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Clinical visit record, keyed by (crm, appointment_id, patient_id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultation {
    pub crm: String,
    pub appointment_id: i64,
    pub patient_id: i64,
    pub date: NaiveDateTime,
    pub diagnosis: String,
    pub notes: Option<String>,
}
