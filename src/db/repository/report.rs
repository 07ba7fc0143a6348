//! Fixed reporting queries: direct aggregates over the base tables plus
//! reads against the precomputed report tables rebuilt by
//! [`refresh_report_views`].

use rusqlite::Connection;

use crate::db::DatabaseError;
use crate::models::*;

/// Rebuild the four precomputed report tables from the base tables.
///
/// Callers wrap this in the request transaction; a failed rebuild rolls
/// back to the previous contents.
pub fn refresh_report_views(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "DELETE FROM patient_category;
         INSERT INTO patient_category (name, total_appointments, category)
         SELECT p.name,
                COUNT(a.id),
                CASE
                    WHEN COUNT(a.id) >= 5 THEN 'Frequente'
                    WHEN COUNT(a.id) >= 2 THEN 'Regular'
                    ELSE 'Esporádico'
                END
         FROM patients p
         LEFT JOIN appointments a ON a.patient_id = p.id
         GROUP BY p.id, p.name;

         DELETE FROM patient_last_appointment;
         INSERT INTO patient_last_appointment (name, phone, phone_type, status)
         SELECT p.name, t.number, t.type, a.status
         FROM patients p
         JOIN appointments a ON a.patient_id = p.id
         JOIN patient_phones t ON t.patient_id = p.id
         WHERE a.date = (SELECT MAX(a2.date) FROM appointments a2
                         WHERE a2.patient_id = p.id)
           AND t.rowid = (SELECT MIN(t2.rowid) FROM patient_phones t2
                          WHERE t2.patient_id = p.id);

         DELETE FROM consultation_referrals;
         INSERT INTO consultation_referrals (physician_name, specialty, patient_name,
                                             diagnosis, consultation_date, referral_type)
         SELECT m.name, m.specialty, p.name, c.diagnosis, c.date, r.type
         FROM consultations c
         JOIN physicians m ON m.crm = c.crm
         JOIN patients p ON p.id = c.patient_id
         JOIN referrals r ON r.appointment_id = c.appointment_id
                         AND r.patient_id = c.patient_id;

         DELETE FROM patient_exam_summary;
         INSERT INTO patient_exam_summary (patient_name, exam_count, exams_taken,
                                           total_consultations)
         SELECT p.name,
                COUNT(re.exam_id),
                COALESCE(GROUP_CONCAT(DISTINCT e.name), ''),
                (SELECT COUNT(*) FROM consultations c WHERE c.patient_id = p.id)
         FROM patients p
         JOIN referrals r ON r.patient_id = p.id
         JOIN referral_exams re ON re.referral_id = r.id
         JOIN exams e ON e.id = re.exam_id
         GROUP BY p.id, p.name;",
    )?;
    Ok(())
}

pub fn appointment_status_counts(conn: &Connection) -> Result<Vec<StatusCount>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT status, COUNT(*) AS total FROM appointments GROUP BY status")?;

    let rows = stmt.query_map([], |row| {
        Ok(StatusCount {
            status: row.get(0)?,
            total: row.get(1)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn physician_consultation_totals(
    conn: &Connection,
) -> Result<Vec<PhysicianConsultations>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT m.name AS physician, COUNT(*) AS total_consultations
         FROM consultations c
         JOIN physicians m ON c.crm = m.crm
         GROUP BY m.name
         ORDER BY total_consultations DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(PhysicianConsultations {
            physician: row.get(0)?,
            total_consultations: row.get(1)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn referral_type_counts(conn: &Connection) -> Result<Vec<ReferralTypeCount>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT type, COUNT(*) AS count FROM referrals GROUP BY type")?;

    let rows = stmt.query_map([], |row| {
        Ok(ReferralTypeCount {
            referral_type: row.get(0)?,
            count: row.get(1)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn cardiology_patients(conn: &Connection) -> Result<Vec<CardiologyPatient>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT p.name AS patient, m.name AS physician, m.specialty
         FROM consultations c
         JOIN physicians m ON c.crm = m.crm
         JOIN appointments a ON c.appointment_id = a.id AND c.patient_id = a.patient_id
         JOIN patients p ON a.patient_id = p.id
         WHERE m.specialty = 'Cardiologia'",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(CardiologyPatient {
            patient: row.get(0)?,
            physician: row.get(1)?,
            specialty: row.get(2)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn patient_categories(conn: &Connection) -> Result<Vec<PatientCategory>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT name, total_appointments, category FROM patient_category")?;

    let rows = stmt.query_map([], |row| {
        Ok(PatientCategory {
            name: row.get(0)?,
            total_appointments: row.get(1)?,
            category: row.get(2)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn patient_last_appointments(
    conn: &Connection,
) -> Result<Vec<PatientLastAppointment>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT name, phone, phone_type, status FROM patient_last_appointment")?;

    let rows = stmt.query_map([], |row| {
        Ok(PatientLastAppointment {
            name: row.get(0)?,
            phone: row.get(1)?,
            phone_type: row.get(2)?,
            status: row.get(3)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn consultation_referral_rows(
    conn: &Connection,
) -> Result<Vec<ConsultationReferral>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT physician_name, specialty, patient_name, diagnosis, consultation_date,
                referral_type
         FROM consultation_referrals",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(ConsultationReferral {
            physician_name: row.get(0)?,
            specialty: row.get(1)?,
            patient_name: row.get(2)?,
            diagnosis: row.get(3)?,
            consultation_date: row.get(4)?,
            referral_type: row.get(5)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn patient_exam_summaries(
    conn: &Connection,
) -> Result<Vec<PatientExamSummary>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT patient_name, exam_count, exams_taken, total_consultations
         FROM patient_exam_summary",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(PatientExamSummary {
            patient_name: row.get(0)?,
            exam_count: row.get(1)?,
            exams_taken: row.get(2)?,
            total_consultations: row.get(3)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}
