//! SQLite schema definition.

/// Name of the single table holding patient records.
pub const PATIENT_TABLE: &str = "patientProfiles";

/// Complete database schema for patient records.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Patient Profiles (insert + read only)
-- ============================================================================

CREATE TABLE IF NOT EXISTS patientProfiles (
    full_name TEXT NOT NULL CHECK (length(full_name) > 0),
    pesel TEXT NOT NULL PRIMARY KEY CHECK (length(pesel) > 0),
    age INTEGER,
    sex TEXT,
    disease TEXT,
    medication TEXT,
    doctors_id VARCHAR(20) NOT NULL CHECK (length(doctors_id) > 0),
    add_date TEXT                                -- YYYY-MM-DD, stamped on insert
);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        assert!(conn.execute_batch(SCHEMA).is_ok());
    }

    #[test]
    fn test_required_columns_reject_empty() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        // Empty doctor ID should fail
        let result = conn.execute(
            "INSERT INTO patientProfiles (full_name, pesel, doctors_id) VALUES ('Jan', '12345678900', '')",
            [],
        );
        assert!(result.is_err());

        // NULL full name should fail
        let result = conn.execute(
            "INSERT INTO patientProfiles (full_name, pesel, doctors_id) VALUES (NULL, '12345678900', 'D1')",
            [],
        );
        assert!(result.is_err());

        // Valid row should succeed
        let result = conn.execute(
            "INSERT INTO patientProfiles (full_name, pesel, doctors_id) VALUES ('Jan', '12345678900', 'D1')",
            [],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_age_affinity() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute(
            "INSERT INTO patientProfiles (full_name, pesel, age, doctors_id) VALUES ('Jan', '12345678900', '25', 'D1')",
            [],
        )
        .unwrap();

        let kind: String = conn
            .query_row("SELECT typeof(age) FROM patientProfiles", [], |row| row.get(0))
            .unwrap();
        assert_eq!(kind, "integer");
    }
}
