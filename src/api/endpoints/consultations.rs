//! Consultation endpoints — `/consultas`, keyed by
//! (crm, appointment_id, patient_id).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::Consultation;

#[derive(Debug, Deserialize)]
pub struct CreateConsultation {
    pub crm: String,
    pub appointment_id: i64,
    pub patient_id: i64,
    pub date: NaiveDateTime,
    pub diagnosis: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateConsultation {
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// `POST /consultas` — record a visit. The referenced physician and
/// appointment pair are enforced by the database, not checked up front.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(payload): Json<CreateConsultation>,
) -> Result<(StatusCode, Json<Consultation>), ApiError> {
    let conn = ctx.open_db()?;

    let consultation = Consultation {
        crm: payload.crm,
        appointment_id: payload.appointment_id,
        patient_id: payload.patient_id,
        date: payload.date,
        diagnosis: payload.diagnosis,
        notes: payload.notes,
    };
    repository::insert_consultation(&conn, &consultation).map_err(ApiError::from_write)?;

    Ok((StatusCode::CREATED, Json(consultation)))
}

/// `GET /consultas`
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Consultation>>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(repository::list_consultations(&conn)?))
}

/// `GET /consultas/:crm/:appointment_id/:patient_id`
pub async fn get(
    State(ctx): State<ApiContext>,
    Path((crm, appointment_id, patient_id)): Path<(String, i64, i64)>,
) -> Result<Json<Consultation>, ApiError> {
    let conn = ctx.open_db()?;
    let consultation = repository::get_consultation(&conn, &crm, appointment_id, patient_id)?
        .ok_or_else(|| ApiError::NotFound("Consultation not found".into()))?;
    Ok(Json(consultation))
}

/// `PATCH /consultas/:crm/:appointment_id/:patient_id` — only diagnosis
/// and notes are merged and persisted.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path((crm, appointment_id, patient_id)): Path<(String, i64, i64)>,
    Json(payload): Json<UpdateConsultation>,
) -> Result<Json<Consultation>, ApiError> {
    let conn = ctx.open_db()?;

    let mut consultation = repository::get_consultation(&conn, &crm, appointment_id, patient_id)?
        .ok_or_else(|| ApiError::NotFound("Consultation not found".into()))?;

    if let Some(diagnosis) = payload.diagnosis {
        consultation.diagnosis = diagnosis;
    }
    if let Some(notes) = payload.notes {
        consultation.notes = Some(notes);
    }

    repository::update_consultation(&conn, &consultation).map_err(ApiError::from_write)?;

    Ok(Json(consultation))
}

/// `DELETE /consultas/:crm/:appointment_id/:patient_id` — 409 while a
/// referral points at the consultation's appointment.
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path((crm, appointment_id, patient_id)): Path<(String, i64, i64)>,
) -> Result<StatusCode, ApiError> {
    let conn = ctx.open_db()?;

    if repository::get_consultation(&conn, &crm, appointment_id, patient_id)?.is_none() {
        return Err(ApiError::NotFound("Consultation not found".into()));
    }
    if repository::referral_exists_for_appointment(&conn, appointment_id, patient_id)? {
        return Err(ApiError::Conflict(
            "Consultation has referrals linked to its appointment".into(),
        ));
    }

    repository::delete_consultation(&conn, &crm, appointment_id, patient_id)
        .map_err(ApiError::from_write)?;
    Ok(StatusCode::NO_CONTENT)
}
