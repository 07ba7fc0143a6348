use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::*;

#[allow(clippy::too_many_arguments)]
pub fn insert_reschedule(
    conn: &Connection,
    old_appointment_id: i64,
    old_patient_id: i64,
    new_appointment_id: i64,
    new_patient_id: i64,
    reason: Option<&str>,
    reschedule_date: NaiveDate,
    requested_by: Option<&str>,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO reschedules (old_appointment_id, old_patient_id,
                                  new_appointment_id, new_patient_id,
                                  reason, reschedule_date, requested_by)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            old_appointment_id,
            old_patient_id,
            new_appointment_id,
            new_patient_id,
            reason,
            reschedule_date,
            requested_by,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_reschedules(conn: &Connection) -> Result<Vec<Reschedule>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, old_appointment_id, old_patient_id, new_appointment_id,
                new_patient_id, reason, reschedule_date, requested_by
         FROM reschedules",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(Reschedule {
            id: row.get(0)?,
            old_appointment_id: row.get(1)?,
            old_patient_id: row.get(2)?,
            new_appointment_id: row.get(3)?,
            new_patient_id: row.get(4)?,
            reason: row.get(5)?,
            reschedule_date: row.get(6)?,
            requested_by: row.get(7)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}
