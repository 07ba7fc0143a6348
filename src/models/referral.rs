use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::ReferralType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Referral {
    pub id: i64,
    pub appointment_id: i64,
    pub patient_id: i64,
    #[serde(rename = "type")]
    pub referral_type: ReferralType,
    pub notes: Option<String>,
}

/// Exam linked to a referral (id + display name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamInfo {
    pub id: i64,
    pub name: String,
}

/// Follow-up appointment created for a Consulta/Ambos referral.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferredAppointment {
    pub appointment_id: i64,
    pub patient_id: i64,
    pub date: NaiveDateTime,
}

/// Referral row composed with its exam links and follow-up appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferralDetail {
    #[serde(flatten)]
    pub referral: Referral,
    pub exams: Vec<ExamInfo>,
    pub scheduled_appointment: Option<ReferredAppointment>,
}
