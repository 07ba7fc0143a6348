//! Reschedule endpoints — `/remarcas`. Append-only history log: create
//! and list, nothing else.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::Reschedule;

#[derive(Debug, Deserialize)]
pub struct CreateReschedule {
    pub old_appointment_id: i64,
    pub old_patient_id: i64,
    pub new_appointment_id: i64,
    pub new_patient_id: i64,
    #[serde(default)]
    pub reason: Option<String>,
    pub reschedule_date: NaiveDate,
    #[serde(default)]
    pub requested_by: Option<String>,
}

/// `POST /remarcas` — append a reschedule record.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(payload): Json<CreateReschedule>,
) -> Result<(StatusCode, Json<Reschedule>), ApiError> {
    let conn = ctx.open_db()?;

    let id = repository::insert_reschedule(
        &conn,
        payload.old_appointment_id,
        payload.old_patient_id,
        payload.new_appointment_id,
        payload.new_patient_id,
        payload.reason.as_deref(),
        payload.reschedule_date,
        payload.requested_by.as_deref(),
    )
    .map_err(ApiError::from_write)?;

    Ok((
        StatusCode::CREATED,
        Json(Reschedule {
            id,
            old_appointment_id: payload.old_appointment_id,
            old_patient_id: payload.old_patient_id,
            new_appointment_id: payload.new_appointment_id,
            new_patient_id: payload.new_patient_id,
            reason: payload.reason,
            reschedule_date: payload.reschedule_date,
            requested_by: payload.requested_by,
        }),
    ))
}

/// `GET /remarcas` — full history scan.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Reschedule>>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(repository::list_reschedules(&conn)?))
}
