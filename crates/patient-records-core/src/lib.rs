//! Patient Records Core Library
//!
//! Local patient registry backed by a single SQLite file, with registration
//! statistics for the reporting windows.
//!
//! # Architecture
//!
//! ```text
//!   Intake form ──► IntakeForm::validate ──► PatientRecord
//!                        │                        │
//!               DiseaseVocabulary                 ▼
//!                                    RecordStore::insert ──► patientProfiles
//!                                                                  │
//!                                    RecordStore::fetch_all ◄──────┘
//!                                                 │
//!                                                 ▼
//!                                  stats::group_by_* ──► FrequencyTable
//!                                                 │
//!                                                 ▼
//!                                     ChartSpec ──► charting component
//! ```
//!
//! # Core Principle
//!
//! **Records are insert + read only.** The registration date is stamped by
//! the store and a PESEL, once stored, never changes.
//!
//! # Modules
//!
//! - [`db`]: SQLite record store with per-call connections
//! - [`models`]: Domain types (PatientRecord, Sex, PatientRow)
//! - [`intake`]: Form checks run before any store call
//! - [`vocabulary`]: Disease list the form checks against
//! - [`stats`]: Frequency tables and chart descriptions
//! - [`config`]: Startup configuration

pub mod config;
pub mod db;
pub mod intake;
pub mod models;
pub mod stats;
pub mod vocabulary;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::{RecordStore, StoreError, StoreErrorKind, StoreResult};
pub use intake::{IntakeError, IntakeForm};
pub use models::{FieldValue, PatientRecord, PatientRow, Sex};
pub use stats::{
    group_by_disease, group_by_registration_year, group_by_sex, ChartKind, ChartSpec,
    FrequencyTable,
};
pub use vocabulary::{DiseaseVocabulary, VocabularyError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::collections::HashMap;
use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PatientRecordsError {
    #[error("Not connected: {0}")]
    NotConnected(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Missing required fields: {0}")]
    MissingRequired(String),

    #[error("Invalid PESEL: {0}")]
    InvalidPesel(String),

    #[error("Invalid sex: {0}")]
    InvalidSex(String),

    #[error("Unknown disease: {0}")]
    UnknownDisease(String),

    #[error("Disease list error: {0}")]
    VocabularyError(String),
}

impl From<StoreError> for PatientRecordsError {
    fn from(e: StoreError) -> Self {
        match e.kind() {
            StoreErrorKind::NotConnected => PatientRecordsError::NotConnected(e.to_string()),
            StoreErrorKind::ConstraintViolation => {
                PatientRecordsError::ConstraintViolation(e.to_string())
            }
            StoreErrorKind::Backend => PatientRecordsError::DatabaseError(e.to_string()),
        }
    }
}

impl From<IntakeError> for PatientRecordsError {
    fn from(e: IntakeError) -> Self {
        match e {
            IntakeError::MissingRequired(fields) => {
                PatientRecordsError::MissingRequired(fields.join(", "))
            }
            IntakeError::InvalidPesel(len) => PatientRecordsError::InvalidPesel(len.to_string()),
            IntakeError::InvalidSex(sex) => PatientRecordsError::InvalidSex(sex),
            IntakeError::UnknownDisease {
                disease,
                suggestion,
            } => PatientRecordsError::UnknownDisease(match suggestion {
                Some(s) => format!("{} (did you mean {}?)", disease, s),
                None => disease,
            }),
        }
    }
}

impl From<VocabularyError> for PatientRecordsError {
    fn from(e: VocabularyError) -> Self {
        PatientRecordsError::VocabularyError(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create the record store at the given path.
///
/// Without a disease list every non-empty disease is rejected at intake.
#[uniffi::export]
pub fn open_record_store(
    db_path: String,
    disease_list_path: Option<String>,
) -> Result<Arc<PatientRecordsCore>, PatientRecordsError> {
    let store = RecordStore::open(&db_path)?;
    let vocabulary = match disease_list_path {
        Some(path) => DiseaseVocabulary::load(path)?,
        None => DiseaseVocabulary::default(),
    };
    Ok(Arc::new(PatientRecordsCore::new(store, vocabulary)))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Record store plus disease list, as seen by the native form.
#[derive(uniffi::Object)]
pub struct PatientRecordsCore {
    store: RecordStore,
    vocabulary: DiseaseVocabulary,
}

impl PatientRecordsCore {
    pub fn new(store: RecordStore, vocabulary: DiseaseVocabulary) -> Self {
        Self { store, vocabulary }
    }

    fn rows(&self) -> Result<Vec<PatientRow>, PatientRecordsError> {
        Ok(self.store.fetch_all()?)
    }
}

#[uniffi::export]
impl PatientRecordsCore {
    // =========================================================================
    // Record Operations
    // =========================================================================

    /// Create the patient table if it is missing.
    pub fn ensure_schema(&self) -> Result<(), PatientRecordsError> {
        Ok(self.store.ensure_schema()?)
    }

    /// Check the form and store the patient it describes.
    pub fn submit_intake(&self, form: FfiIntakeForm) -> Result<(), PatientRecordsError> {
        let record = IntakeForm::from(form).validate(&self.vocabulary)?;
        self.store.insert(&record)?;
        Ok(())
    }

    /// Store an already validated patient.
    pub fn insert_patient(&self, record: FfiPatientRecord) -> Result<(), PatientRecordsError> {
        let record = PatientRecord::try_from(record)?;
        self.store.insert(&record)?;
        Ok(())
    }

    /// Find a patient by PESEL.
    pub fn find_patient(&self, pesel: String) -> Result<Option<FfiPatientRow>, PatientRecordsError> {
        let row = self.store.find_by_key(&pesel)?;
        Ok(row.map(|r| r.into()))
    }

    /// List all patients.
    pub fn list_patients(&self) -> Result<Vec<FfiPatientRow>, PatientRecordsError> {
        Ok(self.rows()?.into_iter().map(|r| r.into()).collect())
    }

    /// Diseases the form offers.
    pub fn disease_terms(&self) -> Vec<String> {
        self.vocabulary.terms().to_vec()
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Registrations per year.
    pub fn yearly_registrations(&self) -> Result<FfiChart, PatientRecordsError> {
        let table = group_by_registration_year(&self.rows()?);
        Ok(stats::yearly_registration_chart(&table).into())
    }

    /// Patients per sex.
    pub fn gender_distribution(&self) -> Result<FfiChart, PatientRecordsError> {
        let table = group_by_sex(&self.rows()?);
        Ok(stats::gender_distribution_chart(&table).into())
    }

    /// Patients per disease.
    pub fn disease_frequency(&self) -> Result<FfiChart, PatientRecordsError> {
        let table = group_by_disease(&self.rows()?);
        Ok(stats::disease_frequency_chart(&table).into())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe intake form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiIntakeForm {
    pub doctors_id: String,
    pub full_name: String,
    pub pesel: String,
    pub age: String,
    pub sex: String,
    pub disease: String,
    pub medication: String,
}

impl From<FfiIntakeForm> for IntakeForm {
    fn from(form: FfiIntakeForm) -> Self {
        IntakeForm {
            doctors_id: form.doctors_id,
            full_name: form.full_name,
            pesel: form.pesel,
            age: form.age,
            sex: form.sex,
            disease: form.disease,
            medication: form.medication,
        }
    }
}

/// FFI-safe patient record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientRecord {
    pub full_name: String,
    pub pesel: String,
    pub age: String,
    pub sex: String,
    pub disease: String,
    pub medication: String,
    pub doctors_id: String,
}

impl TryFrom<FfiPatientRecord> for PatientRecord {
    type Error = PatientRecordsError;

    fn try_from(record: FfiPatientRecord) -> Result<Self, Self::Error> {
        let sex = record.sex.parse().map_err(PatientRecordsError::InvalidSex)?;
        Ok(PatientRecord {
            full_name: record.full_name,
            pesel: record.pesel,
            age: record.age,
            sex,
            disease: record.disease,
            medication: record.medication,
            doctors_id: record.doctors_id,
        })
    }
}

/// FFI-safe stored row, every value rendered as text (NULL as empty).
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientRow {
    pub fields: HashMap<String, String>,
}

impl From<PatientRow> for FfiPatientRow {
    fn from(row: PatientRow) -> Self {
        Self {
            fields: row
                .iter()
                .map(|(column, value)| (column.to_string(), value.to_string()))
                .collect(),
        }
    }
}

/// FFI-safe chart description.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiChart {
    /// "bar" or "pie"
    pub kind: String,
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub labels: Vec<String>,
    pub counts: Vec<u32>,
}

impl From<ChartSpec> for FfiChart {
    fn from(chart: ChartSpec) -> Self {
        Self {
            kind: match chart.kind {
                ChartKind::Bar => "bar".to_string(),
                ChartKind::Pie => "pie".to_string(),
            },
            title: chart.title,
            x_label: chart.x_label,
            y_label: chart.y_label,
            labels: chart.labels,
            counts: chart.counts.into_iter().map(|n| n as u32).collect(),
        }
    }
}
