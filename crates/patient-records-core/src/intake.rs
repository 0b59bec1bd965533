//! Intake form checks run before anything reaches the store.
//!
//! Order of checks: required fields, PESEL length, sex value, disease
//! vocabulary. Each failure is its own [`IntakeError`] variant so the
//! front end can word them differently.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{PatientRecord, Sex};
use crate::vocabulary::DiseaseVocabulary;

/// Required length of a PESEL, in characters.
pub const PESEL_LENGTH: usize = 11;

/// Intake rejections.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingRequired(Vec<&'static str>),

    #[error("Invalid PESEL: expected 11 characters, got {0}")]
    InvalidPesel(usize),

    #[error("Invalid sex: {0}")]
    InvalidSex(String),

    #[error("Disease not on the list: {disease}")]
    UnknownDisease {
        disease: String,
        suggestion: Option<String>,
    },
}

/// Raw text of the intake form fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntakeForm {
    pub doctors_id: String,
    pub full_name: String,
    pub pesel: String,
    pub age: String,
    pub sex: String,
    pub disease: String,
    pub medication: String,
}

impl IntakeForm {
    /// Check the form and build a record from it.
    pub fn validate(&self, vocabulary: &DiseaseVocabulary) -> Result<PatientRecord, IntakeError> {
        let full_name = self.full_name.trim();
        let pesel = self.pesel.trim();
        let age = self.age.trim();
        let sex = self.sex.trim();
        let disease = self.disease.trim();

        let missing: Vec<&'static str> = [
            ("full name", full_name),
            ("PESEL", pesel),
            ("age", age),
            ("sex", sex),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();
        if !missing.is_empty() {
            return Err(IntakeError::MissingRequired(missing));
        }

        let pesel_len = pesel.chars().count();
        if pesel_len != PESEL_LENGTH {
            return Err(IntakeError::InvalidPesel(pesel_len));
        }

        let sex: Sex = sex.parse().map_err(IntakeError::InvalidSex)?;

        if !disease.is_empty() && !vocabulary.contains(disease) {
            return Err(IntakeError::UnknownDisease {
                disease: disease.to_string(),
                suggestion: vocabulary.suggest(disease).map(String::from),
            });
        }

        Ok(PatientRecord::new(
            full_name.to_string(),
            pesel.to_string(),
            age.to_string(),
            sex,
            self.doctors_id.trim().to_string(),
        )
        .with_disease(disease)
        .with_medication(self.medication.trim()))
    }

    /// Blank the patient fields, keeping the doctor's ID for the next entry.
    pub fn clear_patient_info(&mut self) {
        *self = Self {
            doctors_id: std::mem::take(&mut self.doctors_id),
            ..Self::default()
        };
    }
}
