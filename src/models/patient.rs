use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::{PhoneType, Sex};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub birth_date: NaiveDate,
    pub sex: Sex,
    pub email: Option<String>,
    pub cpf: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientPhone {
    pub patient_id: i64,
    pub number: String,
    #[serde(rename = "type")]
    pub phone_type: PhoneType,
}

/// Patient row with its phone list attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientWithPhones {
    #[serde(flatten)]
    pub patient: Patient,
    pub phones: Vec<PatientPhone>,
}
