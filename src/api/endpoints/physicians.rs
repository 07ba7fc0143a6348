//! Physician endpoints — `/medicos`, keyed by CRM license number.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::Physician;

#[derive(Debug, Deserialize)]
pub struct CreatePhysician {
    pub crm: String,
    pub name: String,
    pub specialty: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePhysician {
    #[serde(default)]
    pub name: Option<String>,
}

/// `POST /medicos` — register a physician; duplicate CRM is a conflict.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(payload): Json<CreatePhysician>,
) -> Result<(StatusCode, Json<Physician>), ApiError> {
    let conn = ctx.open_db()?;

    let physician = Physician {
        crm: payload.crm,
        name: payload.name,
        specialty: payload.specialty,
    };
    repository::insert_physician(&conn, &physician).map_err(ApiError::from_write)?;

    Ok((StatusCode::CREATED, Json(physician)))
}

/// `GET /medicos`
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Physician>>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(repository::list_physicians(&conn)?))
}

/// `GET /medicos/:crm`
pub async fn get(
    State(ctx): State<ApiContext>,
    Path(crm): Path<String>,
) -> Result<Json<Physician>, ApiError> {
    let conn = ctx.open_db()?;
    let physician = repository::get_physician(&conn, &crm)?
        .ok_or_else(|| ApiError::NotFound("Physician not found".into()))?;
    Ok(Json(physician))
}

/// `PATCH /medicos/:crm` — only the name is mutable.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(crm): Path<String>,
    Json(payload): Json<UpdatePhysician>,
) -> Result<Json<Physician>, ApiError> {
    let conn = ctx.open_db()?;

    let mut physician = repository::get_physician(&conn, &crm)?
        .ok_or_else(|| ApiError::NotFound("Physician not found".into()))?;

    if let Some(name) = payload.name {
        physician.name = name;
    }
    repository::update_physician_name(&conn, &crm, &physician.name)
        .map_err(ApiError::from_write)?;

    Ok(Json(physician))
}

/// `DELETE /medicos/:crm` — 409 while consultations reference the CRM.
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(crm): Path<String>,
) -> Result<StatusCode, ApiError> {
    let conn = ctx.open_db()?;

    let deleted = repository::delete_physician(&conn, &crm).map_err(ApiError::from_write)?;
    if !deleted {
        return Err(ApiError::NotFound("Physician not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
