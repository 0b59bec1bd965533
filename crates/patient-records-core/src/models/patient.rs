//! Patient models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Patient sex as offered by the intake form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    /// All values, in the order the form lists them.
    pub const ALL: [Sex; 3] = [Sex::Male, Sex::Female, Sex::Other];

    /// Stored spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
            Sex::Other => "Other",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sex::ALL
            .into_iter()
            .find(|sex| sex.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// A patient record ready to be persisted.
///
/// Built transiently from form input; the registration date is not part of
/// it because the store stamps that at insert time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientRecord {
    /// Full name
    pub full_name: String,
    /// National identifier, 11 characters, primary key
    pub pesel: String,
    /// Age as entered (free text, stored in an INTEGER column)
    pub age: String,
    pub sex: Sex,
    /// Disease from the fixed vocabulary, empty when not given
    pub disease: String,
    /// Medication, empty when not given
    pub medication: String,
    /// Attending doctor's identifier
    pub doctors_id: String,
}

impl PatientRecord {
    /// Create a record with the required fields; optional fields start empty.
    pub fn new(
        full_name: String,
        pesel: String,
        age: String,
        sex: Sex,
        doctors_id: String,
    ) -> Self {
        Self {
            full_name,
            pesel,
            age,
            sex,
            disease: String::new(),
            medication: String::new(),
            doctors_id,
        }
    }

    pub fn with_disease(mut self, disease: impl Into<String>) -> Self {
        self.disease = disease.into();
        self
    }

    pub fn with_medication(mut self, medication: impl Into<String>) -> Self {
        self.medication = medication.into();
        self
    }
}
