use rusqlite::{params, Connection, Row};

use crate::db::DatabaseError;
use crate::models::*;

fn map_physician(row: &Row<'_>) -> rusqlite::Result<Physician> {
    Ok(Physician {
        crm: row.get(0)?,
        name: row.get(1)?,
        specialty: row.get(2)?,
    })
}

pub fn insert_physician(conn: &Connection, physician: &Physician) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO physicians (crm, name, specialty) VALUES (?1, ?2, ?3)",
        params![physician.crm, physician.name, physician.specialty],
    )?;
    Ok(())
}

pub fn get_physician(conn: &Connection, crm: &str) -> Result<Option<Physician>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT crm, name, specialty FROM physicians WHERE crm = ?1")?;

    match stmt.query_row(params![crm], map_physician) {
        Ok(physician) => Ok(Some(physician)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_physicians(conn: &Connection) -> Result<Vec<Physician>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT crm, name, specialty FROM physicians")?;

    let rows = stmt.query_map([], map_physician)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Only the name is mutable; CRM and specialty are fixed at creation.
pub fn update_physician_name(
    conn: &Connection,
    crm: &str,
    name: &str,
) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE physicians SET name = ?1 WHERE crm = ?2",
        params![name, crm],
    )?;
    Ok(())
}

/// Returns false when no physician row matched.
pub fn delete_physician(conn: &Connection, crm: &str) -> Result<bool, DatabaseError> {
    let deleted = conn.execute("DELETE FROM physicians WHERE crm = ?1", params![crm])?;
    Ok(deleted > 0)
}
