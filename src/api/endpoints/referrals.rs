//! Referral endpoints — `/encaminhamentos`.
//!
//! A referral fans out into exam links and/or a follow-up appointment
//! link depending on its type; all rows are written in one transaction.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rusqlite::Connection;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{ReferralDetail, ReferralType};

#[derive(Debug, Deserialize)]
pub struct CreateReferral {
    pub appointment_id: i64,
    pub patient_id: i64,
    #[serde(rename = "type")]
    pub referral_type: ReferralType,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub exam_ids: Option<Vec<i64>>,
    #[serde(default)]
    pub new_appointment_id: Option<i64>,
    #[serde(default)]
    pub new_patient_id: Option<i64>,
}

fn fetch_referral(conn: &Connection, id: i64) -> Result<ReferralDetail, ApiError> {
    let referral = repository::get_referral(conn, id)?
        .ok_or_else(|| ApiError::NotFound("Referral not found".into()))?;

    let exams = if referral.referral_type.includes_exam() {
        repository::get_referral_exams(conn, id)?
    } else {
        Vec::new()
    };
    let scheduled_appointment = if referral.referral_type.includes_consultation() {
        repository::get_referral_appointment(conn, id)?
    } else {
        None
    };

    Ok(ReferralDetail {
        referral,
        exams,
        scheduled_appointment,
    })
}

/// `POST /encaminhamentos` — validate the fields the declared type
/// requires, then insert the parent row and its sub-records atomically.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(payload): Json<CreateReferral>,
) -> Result<(StatusCode, Json<ReferralDetail>), ApiError> {
    let exam_ids = payload.exam_ids.as_deref().unwrap_or(&[]);
    if payload.referral_type.includes_exam() && exam_ids.is_empty() {
        return Err(ApiError::BadRequest(format!(
            "'exam_ids' is required for {} referrals",
            payload.referral_type.as_str()
        )));
    }
    let follow_up = if payload.referral_type.includes_consultation() {
        match (payload.new_appointment_id, payload.new_patient_id) {
            (Some(appointment_id), Some(patient_id)) => Some((appointment_id, patient_id)),
            _ => {
                return Err(ApiError::BadRequest(format!(
                    "'new_appointment_id' and 'new_patient_id' are required for {} referrals",
                    payload.referral_type.as_str()
                )))
            }
        }
    } else {
        None
    };

    let mut conn = ctx.open_db()?;
    let tx = conn
        .transaction()
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let id = repository::insert_referral(
        &tx,
        payload.appointment_id,
        payload.patient_id,
        payload.referral_type,
        payload.notes.as_deref(),
    )
    .map_err(ApiError::from_write)?;

    // Any failed sub-insert drops the transaction and takes the parent
    // row with it.
    for exam_id in exam_ids {
        repository::link_referral_exam(&tx, id, *exam_id).map_err(ApiError::from_write)?;
    }
    if let Some((appointment_id, patient_id)) = follow_up {
        repository::link_referral_consultation(&tx, id, appointment_id, patient_id)
            .map_err(ApiError::from_write)?;
    }

    tx.commit().map_err(|e| ApiError::from_write(e.into()))?;

    Ok((StatusCode::CREATED, Json(fetch_referral(&conn, id)?)))
}

/// `GET /encaminhamentos/:id` — parent row merged with its exam list and
/// follow-up appointment.
pub async fn get(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<ReferralDetail>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(fetch_referral(&conn, id)?))
}
