//! Patient record operations.

use chrono::{Local, NaiveDate};
use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info, warn};

use super::{RecordStore, StoreError, StoreResult};
use crate::models::{FieldValue, PatientRecord, PatientRow};

/// Format of the `add_date` column.
pub const ADD_DATE_FORMAT: &str = "%Y-%m-%d";

impl RecordStore {
    /// Insert a new patient, stamped with today's date.
    pub fn insert(&self, record: &PatientRecord) -> StoreResult<()> {
        self.insert_dated(record, Local::now().date_naive())
    }

    pub(crate) fn insert_dated(&self, record: &PatientRecord, add_date: NaiveDate) -> StoreResult<()> {
        let add_date = add_date.format(ADD_DATE_FORMAT).to_string();

        let result = self.with_connection(|conn| {
            conn.execute(
                r#"
                INSERT INTO patientProfiles (
                    full_name, pesel, age, sex, disease, medication, doctors_id, add_date
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
                params![
                    record.full_name,
                    record.pesel,
                    record.age,
                    record.sex.as_str(),
                    record.disease,
                    record.medication,
                    record.doctors_id,
                    add_date,
                ],
            )
            .map_err(StoreError::classify)?;
            Ok(())
        });

        match &result {
            Ok(()) => info!(add_date = %add_date, "Patient successfully added"),
            Err(e) => warn!(error = %e, "Not able to add patient"),
        }
        result
    }

    /// Get a patient by PESEL; `None` when no row matches.
    pub fn find_by_key(&self, pesel: &str) -> StoreResult<Option<PatientRow>> {
        let row = self.with_connection(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM patientProfiles WHERE pesel = ?")?;
            let columns = column_names(&stmt);
            stmt.query_row([pesel], |row| read_row(row, &columns))
                .optional()
                .map_err(Into::into)
        })?;

        debug!(found = row.is_some(), "Patient lookup");
        Ok(row)
    }

    /// List every patient, in whatever order the engine yields them.
    pub fn fetch_all(&self) -> StoreResult<Vec<PatientRow>> {
        let rows = self.with_connection(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM patientProfiles")?;
            let columns = column_names(&stmt);
            let rows = stmt.query_map([], |row| read_row(row, &columns))?;
            rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
        })?;

        debug!(count = rows.len(), "Fetched patients");
        Ok(rows)
    }
}

fn column_names(stmt: &rusqlite::Statement<'_>) -> Vec<String> {
    stmt.column_names().into_iter().map(String::from).collect()
}

fn read_row(row: &Row<'_>, columns: &[String]) -> rusqlite::Result<PatientRow> {
    columns
        .iter()
        .enumerate()
        .map(|(idx, name)| Ok((name.as_str(), FieldValue::from(row.get_ref(idx)?))))
        .collect()
}
