//! Appointment endpoints — `/agendamentos`, keyed by (id, patient_id).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{Appointment, AppointmentStatus};

#[derive(Debug, Deserialize)]
pub struct CreateAppointment {
    pub patient_id: i64,
    pub date: NaiveDateTime,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAppointment {
    // Accepted for wire compatibility; the row keeps its owning patient.
    #[serde(default)]
    pub patient_id: Option<i64>,
    #[serde(default)]
    pub date: Option<NaiveDateTime>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
}

/// `POST /agendamentos` — create a slot. Status is always Marcada; the
/// create payload carries no status field.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(payload): Json<CreateAppointment>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let conn = ctx.open_db()?;

    let id = repository::insert_appointment(
        &conn,
        payload.patient_id,
        payload.date,
        payload.notes.as_deref(),
    )
    .map_err(ApiError::from_write)?;

    Ok((
        StatusCode::CREATED,
        Json(Appointment {
            id,
            patient_id: payload.patient_id,
            date: payload.date,
            notes: payload.notes,
            status: AppointmentStatus::Scheduled,
        }),
    ))
}

/// `GET /agendamentos`
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Appointment>>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(repository::list_appointments(&conn)?))
}

/// `GET /agendamentos/:id/:patient_id`
pub async fn get(
    State(ctx): State<ApiContext>,
    Path((id, patient_id)): Path<(i64, i64)>,
) -> Result<Json<Appointment>, ApiError> {
    let conn = ctx.open_db()?;
    let appointment = repository::get_appointment(&conn, id, patient_id)?
        .ok_or_else(|| ApiError::NotFound("Appointment not found".into()))?;
    Ok(Json(appointment))
}

/// `PATCH /agendamentos/:id/:patient_id` — merge date, notes and status.
/// Status accepts any enum value; no transition rules are enforced.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path((id, patient_id)): Path<(i64, i64)>,
    Json(payload): Json<UpdateAppointment>,
) -> Result<Json<Appointment>, ApiError> {
    let conn = ctx.open_db()?;

    let mut appointment = repository::get_appointment(&conn, id, patient_id)?
        .ok_or_else(|| ApiError::NotFound("Appointment not found".into()))?;

    if let Some(date) = payload.date {
        appointment.date = date;
    }
    if let Some(notes) = payload.notes {
        appointment.notes = Some(notes);
    }
    if let Some(status) = payload.status {
        appointment.status = status;
    }

    repository::update_appointment(&conn, &appointment).map_err(ApiError::from_write)?;

    Ok(Json(appointment))
}

/// `DELETE /agendamentos/:id/:patient_id` — 409 while consultations,
/// reschedules or referrals reference the slot.
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path((id, patient_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    let conn = ctx.open_db()?;

    let deleted =
        repository::delete_appointment(&conn, id, patient_id).map_err(ApiError::from_write)?;
    if !deleted {
        return Err(ApiError::NotFound("Appointment not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
