//! User-facing wording for store and intake outcomes.

use patient_records_core::{IntakeError, StoreError, StoreErrorKind};

pub const INSERTED: &str = "Everything is good! Data is inserted";
pub const NOT_FOUND: &str = "Patient not found.";

pub fn intake(e: &IntakeError) -> String {
    match e {
        IntakeError::MissingRequired(fields) => format!(
            "Full Name, PESEL, Age and Sex must be filled (missing: {})",
            fields.join(", ")
        ),
        IntakeError::InvalidPesel(_) => "Invalid Pesel".to_string(),
        IntakeError::InvalidSex(sex) => {
            format!("Sex must be Male, Female or Other, not '{}'", sex)
        }
        IntakeError::UnknownDisease {
            suggestion: Some(s),
            ..
        } => format!(
            "Unable to add disease, disease not on the list. Did you mean '{}'?",
            s
        ),
        IntakeError::UnknownDisease { .. } => {
            "Unable to add disease, disease not on the list".to_string()
        }
    }
}

pub fn store(e: &StoreError) -> String {
    match (e, e.kind()) {
        (StoreError::DuplicateKey(_), _) => {
            "Not able to add patient: a patient with this PESEL is already registered".to_string()
        }
        (_, StoreErrorKind::NotConnected) => {
            format!("Not able to connect to the database ({})", e)
        }
        (_, StoreErrorKind::ConstraintViolation) => {
            "Not able to add patient: full name, PESEL and doctor's ID must not be empty"
                .to_string()
        }
        (_, StoreErrorKind::Backend) => format!("Database error: {}", e),
    }
}
