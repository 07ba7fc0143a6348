use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

use crate::db::DatabaseError;
use crate::models::*;

fn map_patient(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        name: row.get(1)?,
        birth_date: row.get(2)?,
        sex: row.get(3)?,
        email: row.get(4)?,
        cpf: row.get(5)?,
    })
}

pub fn insert_patient(
    conn: &Connection,
    name: &str,
    birth_date: NaiveDate,
    sex: Sex,
    email: Option<&str>,
    cpf: &str,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO patients (name, birth_date, sex, email, cpf)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![name, birth_date, sex, email, cpf],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_patient(conn: &Connection, id: i64) -> Result<Option<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, birth_date, sex, email, cpf FROM patients WHERE id = ?1",
    )?;

    match stmt.query_row(params![id], map_patient) {
        Ok(patient) => Ok(Some(patient)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT id, name, birth_date, sex, email, cpf FROM patients")?;

    let rows = stmt.query_map([], map_patient)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn get_patient_phones(
    conn: &Connection,
    patient_id: i64,
) -> Result<Vec<PatientPhone>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT patient_id, number, type FROM patient_phones WHERE patient_id = ?1",
    )?;

    let rows = stmt.query_map(params![patient_id], |row| {
        Ok(PatientPhone {
            patient_id: row.get(0)?,
            number: row.get(1)?,
            phone_type: row.get(2)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Persist the mutable patient columns (name, sex, email).
pub fn update_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE patients SET name = ?1, sex = ?2, email = ?3 WHERE id = ?4",
        params![patient.name, patient.sex, patient.email, patient.id],
    )?;
    Ok(())
}

/// Replace the stored phone list wholesale (delete then reinsert).
pub fn replace_patient_phones(
    conn: &Connection,
    patient_id: i64,
    phones: &[PatientPhone],
) -> Result<(), DatabaseError> {
    conn.execute(
        "DELETE FROM patient_phones WHERE patient_id = ?1",
        params![patient_id],
    )?;
    for phone in phones {
        conn.execute(
            "INSERT INTO patient_phones (patient_id, number, type) VALUES (?1, ?2, ?3)",
            params![patient_id, phone.number, phone.phone_type],
        )?;
    }
    Ok(())
}

/// Delete a patient and its phone rows. Returns false when no patient
/// row matched.
pub fn delete_patient(conn: &Connection, id: i64) -> Result<bool, DatabaseError> {
    conn.execute(
        "DELETE FROM patient_phones WHERE patient_id = ?1",
        params![id],
    )?;
    let deleted = conn.execute("DELETE FROM patients WHERE id = ?1", params![id])?;
    Ok(deleted > 0)
}
