use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::*;

pub fn insert_referral(
    conn: &Connection,
    appointment_id: i64,
    patient_id: i64,
    referral_type: ReferralType,
    notes: Option<&str>,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO referrals (appointment_id, patient_id, type, notes)
         VALUES (?1, ?2, ?3, ?4)",
        params![appointment_id, patient_id, referral_type, notes],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn link_referral_exam(
    conn: &Connection,
    referral_id: i64,
    exam_id: i64,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO referral_exams (referral_id, exam_id) VALUES (?1, ?2)",
        params![referral_id, exam_id],
    )?;
    Ok(())
}

pub fn link_referral_consultation(
    conn: &Connection,
    referral_id: i64,
    appointment_id: i64,
    patient_id: i64,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO referral_consultations (referral_id, appointment_id, patient_id)
         VALUES (?1, ?2, ?3)",
        params![referral_id, appointment_id, patient_id],
    )?;
    Ok(())
}

pub fn get_referral(conn: &Connection, id: i64) -> Result<Option<Referral>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, appointment_id, patient_id, type, notes FROM referrals WHERE id = ?1",
    )?;

    let referral = stmt
        .query_row(params![id], |row| {
            Ok(Referral {
                id: row.get(0)?,
                appointment_id: row.get(1)?,
                patient_id: row.get(2)?,
                referral_type: row.get(3)?,
                notes: row.get(4)?,
            })
        })
        .optional()?;
    Ok(referral)
}

/// Exams linked to a referral, joined for their display names.
pub fn get_referral_exams(conn: &Connection, referral_id: i64) -> Result<Vec<ExamInfo>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT e.id, e.name FROM exams e
         JOIN referral_exams re ON e.id = re.exam_id
         WHERE re.referral_id = ?1",
    )?;

    let rows = stmt.query_map(params![referral_id], |row| {
        Ok(ExamInfo {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// The follow-up appointment linked to a Consulta/Ambos referral, joined
/// back to the appointments table for its date.
pub fn get_referral_appointment(
    conn: &Connection,
    referral_id: i64,
) -> Result<Option<ReferredAppointment>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.patient_id, a.date FROM appointments a
         JOIN referral_consultations rc
           ON a.id = rc.appointment_id AND a.patient_id = rc.patient_id
         WHERE rc.referral_id = ?1",
    )?;

    let appointment = stmt
        .query_row(params![referral_id], |row| {
            Ok(ReferredAppointment {
                appointment_id: row.get(0)?,
                patient_id: row.get(1)?,
                date: row.get(2)?,
            })
        })
        .optional()?;
    Ok(appointment)
}

/// Whether any referral points at the given appointment/patient pair.
pub fn referral_exists_for_appointment(
    conn: &Connection,
    appointment_id: i64,
    patient_id: i64,
) -> Result<bool, DatabaseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM referrals WHERE appointment_id = ?1 AND patient_id = ?2",
        params![appointment_id, patient_id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
