//! Reporting endpoints — `/relatorios`. Read-only over base tables and
//! the precomputed report tables.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::*;

/// `GET /relatorios/agendamentos-por-status` — rebuilds the precomputed
/// report tables in the same request, then aggregates status counts.
pub async fn appointments_by_status(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<StatusCount>>, ApiError> {
    let mut conn = ctx.open_db()?;

    let tx = conn
        .transaction()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    repository::refresh_report_views(&tx)?;
    tx.commit().map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(repository::appointment_status_counts(&conn)?))
}

/// `GET /relatorios/medicos-total-consultas`
pub async fn physicians_total_consultations(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<PhysicianConsultations>>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(repository::physician_consultation_totals(&conn)?))
}

/// `GET /relatorios/encaminhamentos-por-tipo`
pub async fn referrals_by_type(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<ReferralTypeCount>>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(repository::referral_type_counts(&conn)?))
}

/// `GET /relatorios/pacientes-cardiologia`
pub async fn cardiology_patients(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<CardiologyPatient>>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(repository::cardiology_patients(&conn)?))
}

/// `GET /relatorios/categoria-paciente` — precomputed frequency buckets.
pub async fn patient_categories(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<PatientCategory>>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(repository::patient_categories(&conn)?))
}

/// `GET /relatorios/ultimo-agendamento-paciente` — precomputed last
/// appointment + contact per patient.
pub async fn last_appointment_per_patient(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<PatientLastAppointment>>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(repository::patient_last_appointments(&conn)?))
}

/// `GET /relatorios/consultas-encaminhamentos` — precomputed join of
/// consultations and the referrals they generated.
pub async fn consultation_referrals(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<ConsultationReferral>>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(repository::consultation_referral_rows(&conn)?))
}

/// `GET /relatorios/exames-consultas-por-paciente` — precomputed exam and
/// consultation summary per patient.
pub async fn exam_summary_per_patient(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<PatientExamSummary>>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(repository::patient_exam_summaries(&conn)?))
}
