//! Report row shapes. Each struct mirrors one fixed reporting query;
//! rows are mapped positionally from the SELECT column order.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicianConsultations {
    pub physician: String,
    pub total_consultations: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferralTypeCount {
    #[serde(rename = "type")]
    pub referral_type: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardiologyPatient {
    pub patient: String,
    pub physician: String,
    pub specialty: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientCategory {
    pub name: String,
    pub total_appointments: i64,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientLastAppointment {
    pub name: String,
    pub phone: String,
    pub phone_type: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationReferral {
    pub physician_name: String,
    pub specialty: String,
    pub patient_name: String,
    pub diagnosis: String,
    pub consultation_date: NaiveDateTime,
    pub referral_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientExamSummary {
    pub patient_name: String,
    pub exam_count: i64,
    pub exams_taken: String,
    pub total_consultations: i64,
}
