use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};

use crate::db::DatabaseError;
use crate::models::*;

fn map_appointment(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        date: row.get(2)?,
        notes: row.get(3)?,
        status: row.get(4)?,
    })
}

/// Insert a new slot. Status is always stored as Marcada regardless of
/// what the caller received on the wire.
pub fn insert_appointment(
    conn: &Connection,
    patient_id: i64,
    date: NaiveDateTime,
    notes: Option<&str>,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO appointments (patient_id, date, notes, status)
         VALUES (?1, ?2, ?3, ?4)",
        params![patient_id, date, notes, AppointmentStatus::Scheduled],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_appointment(
    conn: &Connection,
    id: i64,
    patient_id: i64,
) -> Result<Option<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, date, notes, status FROM appointments
         WHERE id = ?1 AND patient_id = ?2",
    )?;

    match stmt.query_row(params![id, patient_id], map_appointment) {
        Ok(appointment) => Ok(Some(appointment)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_appointments(conn: &Connection) -> Result<Vec<Appointment>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT id, patient_id, date, notes, status FROM appointments")?;

    let rows = stmt.query_map([], map_appointment)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Persist the mutable columns (date, notes, status). The owning patient
/// never changes.
pub fn update_appointment(conn: &Connection, appointment: &Appointment) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE appointments SET date = ?1, notes = ?2, status = ?3
         WHERE id = ?4 AND patient_id = ?5",
        params![
            appointment.date,
            appointment.notes,
            appointment.status,
            appointment.id,
            appointment.patient_id,
        ],
    )?;
    Ok(())
}

/// Returns false when no appointment row matched.
pub fn delete_appointment(
    conn: &Connection,
    id: i64,
    patient_id: i64,
) -> Result<bool, DatabaseError> {
    let deleted = conn.execute(
        "DELETE FROM appointments WHERE id = ?1 AND patient_id = ?2",
        params![id, patient_id],
    )?;
    Ok(deleted > 0)
}
