use rusqlite::{params, Connection, Row};

use crate::db::DatabaseError;
use crate::models::*;

fn map_consultation(row: &Row<'_>) -> rusqlite::Result<Consultation> {
    Ok(Consultation {
        crm: row.get(0)?,
        appointment_id: row.get(1)?,
        patient_id: row.get(2)?,
        date: row.get(3)?,
        diagnosis: row.get(4)?,
        notes: row.get(5)?,
    })
}

pub fn insert_consultation(
    conn: &Connection,
    consultation: &Consultation,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO consultations (crm, appointment_id, patient_id, date, diagnosis, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            consultation.crm,
            consultation.appointment_id,
            consultation.patient_id,
            consultation.date,
            consultation.diagnosis,
            consultation.notes,
        ],
    )?;
    Ok(())
}

pub fn get_consultation(
    conn: &Connection,
    crm: &str,
    appointment_id: i64,
    patient_id: i64,
) -> Result<Option<Consultation>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT crm, appointment_id, patient_id, date, diagnosis, notes FROM consultations
         WHERE crm = ?1 AND appointment_id = ?2 AND patient_id = ?3",
    )?;

    match stmt.query_row(params![crm, appointment_id, patient_id], map_consultation) {
        Ok(consultation) => Ok(Some(consultation)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_consultations(conn: &Connection) -> Result<Vec<Consultation>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT crm, appointment_id, patient_id, date, diagnosis, notes FROM consultations",
    )?;

    let rows = stmt.query_map([], map_consultation)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Only diagnosis and notes are mutable after creation.
pub fn update_consultation(
    conn: &Connection,
    consultation: &Consultation,
) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE consultations SET diagnosis = ?1, notes = ?2
         WHERE crm = ?3 AND appointment_id = ?4 AND patient_id = ?5",
        params![
            consultation.diagnosis,
            consultation.notes,
            consultation.crm,
            consultation.appointment_id,
            consultation.patient_id,
        ],
    )?;
    Ok(())
}

/// Returns false when no consultation row matched.
pub fn delete_consultation(
    conn: &Connection,
    crm: &str,
    appointment_id: i64,
    patient_id: i64,
) -> Result<bool, DatabaseError> {
    let deleted = conn.execute(
        "DELETE FROM consultations WHERE crm = ?1 AND appointment_id = ?2 AND patient_id = ?3",
        params![crm, appointment_id, patient_id],
    )?;
    Ok(deleted > 0)
}
