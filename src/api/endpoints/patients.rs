//! Patient endpoints — `/pacientes`.
//!
//! Create, list, get, partial update (with optional wholesale phone
//! replacement) and delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{PatientPhone, PatientWithPhones, PhoneType, Sex};

#[derive(Debug, Deserialize)]
pub struct CreatePatient {
    pub name: String,
    pub birth_date: NaiveDate,
    pub sex: Sex,
    #[serde(default)]
    pub email: Option<String>,
    pub cpf: String,
}

#[derive(Debug, Deserialize)]
pub struct PhonePayload {
    pub number: String,
    #[serde(rename = "type")]
    pub phone_type: PhoneType,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePatient {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sex: Option<Sex>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phones: Option<Vec<PhonePayload>>,
}

fn fetch_patient(conn: &Connection, id: i64) -> Result<PatientWithPhones, ApiError> {
    let patient = repository::get_patient(conn, id)?
        .ok_or_else(|| ApiError::NotFound("Patient not found".into()))?;
    let phones = repository::get_patient_phones(conn, id)?;
    Ok(PatientWithPhones { patient, phones })
}

/// `POST /pacientes` — register a patient.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(payload): Json<CreatePatient>,
) -> Result<(StatusCode, Json<PatientWithPhones>), ApiError> {
    let conn = ctx.open_db()?;

    let id = repository::insert_patient(
        &conn,
        &payload.name,
        payload.birth_date,
        payload.sex,
        payload.email.as_deref(),
        &payload.cpf,
    )
    .map_err(ApiError::from_write)?;

    Ok((StatusCode::CREATED, Json(fetch_patient(&conn, id)?)))
}

/// `GET /pacientes` — every patient with phones attached.
pub async fn list(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<PatientWithPhones>>, ApiError> {
    let conn = ctx.open_db()?;

    let patients = repository::list_patients(&conn)?;
    let mut records = Vec::with_capacity(patients.len());
    // One phone lookup per patient
    for patient in patients {
        let phones = repository::get_patient_phones(&conn, patient.id)?;
        records.push(PatientWithPhones { patient, phones });
    }

    Ok(Json(records))
}

/// `GET /pacientes/:id`
pub async fn get(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<PatientWithPhones>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(fetch_patient(&conn, id)?))
}

/// `PATCH /pacientes/:id` — merge provided fields; a supplied phone list
/// replaces the stored one wholesale, even when empty.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePatient>,
) -> Result<Json<PatientWithPhones>, ApiError> {
    let mut conn = ctx.open_db()?;
    let tx = conn
        .transaction()
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let mut patient = repository::get_patient(&tx, id)?
        .ok_or_else(|| ApiError::NotFound("Patient not found".into()))?;

    if let Some(name) = payload.name {
        patient.name = name;
    }
    if let Some(sex) = payload.sex {
        patient.sex = sex;
    }
    if let Some(email) = payload.email {
        patient.email = Some(email);
    }

    repository::update_patient(&tx, &patient).map_err(ApiError::from_write)?;

    if let Some(phones) = payload.phones {
        let phones: Vec<PatientPhone> = phones
            .into_iter()
            .map(|p| PatientPhone {
                patient_id: id,
                number: p.number,
                phone_type: p.phone_type,
            })
            .collect();
        repository::replace_patient_phones(&tx, id, &phones).map_err(ApiError::from_write)?;
    }

    tx.commit().map_err(|e| ApiError::from_write(e.into()))?;

    Ok(Json(fetch_patient(&conn, id)?))
}

/// `DELETE /pacientes/:id` — phones first, then the patient row, in one
/// transaction. Rows referencing the patient elsewhere surface as 409.
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let mut conn = ctx.open_db()?;
    let tx = conn
        .transaction()
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let deleted = repository::delete_patient(&tx, id).map_err(ApiError::from_write)?;
    if !deleted {
        // Dropping the transaction undoes the phone cleanup
        return Err(ApiError::NotFound("Patient not found".into()));
    }

    tx.commit().map_err(|e| ApiError::from_write(e.into()))?;
    Ok(StatusCode::NO_CONTENT)
}
