//! Database layer for patient records.
//!
//! [`RecordStore`] holds only the path of the backing file. Every operation
//! opens its own connection through [`RecordStore::with_connection`] and
//! closes it before returning, on the error path too.

mod patients;
mod schema;

pub use patients::*;
pub use schema::*;

use std::path::{Path, PathBuf};

use rusqlite::{ffi, Connection, ErrorCode};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::AppConfig;

/// Database errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Cannot open database {}: {source}", .path.display())]
    NotConnected {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Schema not ready: {0}")]
    Schema(#[source] rusqlite::Error),

    #[error("Duplicate PESEL: {0}")]
    DuplicateKey(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Coarse classification of a [`StoreError`] for callers that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The backing file could not be opened or written.
    NotConnected,
    /// Duplicate PESEL, or an empty/NULL required column.
    ConstraintViolation,
    /// Anything else the engine reported.
    Backend,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::NotConnected { .. } => StoreErrorKind::NotConnected,
            StoreError::DuplicateKey(_) | StoreError::Constraint(_) => {
                StoreErrorKind::ConstraintViolation
            }
            StoreError::Schema(e) | StoreError::Sqlite(e) => match e.sqlite_error_code() {
                Some(ErrorCode::CannotOpen)
                | Some(ErrorCode::ReadOnly)
                | Some(ErrorCode::PermissionDenied) => StoreErrorKind::NotConnected,
                Some(ErrorCode::ConstraintViolation) => StoreErrorKind::ConstraintViolation,
                _ => StoreErrorKind::Backend,
            },
        }
    }

    /// Lift engine constraint failures into [`StoreError::DuplicateKey`] (key
    /// already present) or [`StoreError::Constraint`] (empty or NULL column).
    pub(crate) fn classify(e: rusqlite::Error) -> Self {
        match e {
            rusqlite::Error::SqliteFailure(ref err, ref msg)
                if err.code == ErrorCode::ConstraintViolation =>
            {
                let detail = msg.clone().unwrap_or_else(|| err.to_string());
                match err.extended_code {
                    ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE => {
                        StoreError::DuplicateKey(detail)
                    }
                    _ => StoreError::Constraint(detail),
                }
            }
            other => StoreError::Sqlite(other),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Handle to the patient records file.
///
/// Construct once at startup and pass it to whatever needs it.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Create a handle without touching the file.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a handle and make sure the schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let store = Self::new(path);
        store.ensure_schema()?;
        Ok(store)
    }

    /// Open the store configured in `config`.
    pub fn from_config(config: &AppConfig) -> StoreResult<Self> {
        Self::open(config.database_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the patient table if it does not exist yet. Idempotent.
    pub fn ensure_schema(&self) -> StoreResult<()> {
        let result = self.with_connection(|conn| {
            conn.execute_batch(SCHEMA).map_err(StoreError::Schema)
        });

        match &result {
            Ok(()) => info!(path = %self.path.display(), "Schema ready"),
            Err(e) => error!(path = %self.path.display(), error = %e, "Schema not ready"),
        }
        result
    }

    fn connect(&self) -> StoreResult<Connection> {
        Connection::open(&self.path).map_err(|source| {
            error!(path = %self.path.display(), error = %source, "Not able to connect");
            StoreError::NotConnected {
                path: self.path.clone(),
                source,
            }
        })
    }

    /// Run `op` on a fresh connection, closing it afterwards whatever the outcome.
    pub(crate) fn with_connection<T>(
        &self,
        op: impl FnOnce(&Connection) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let conn = self.connect()?;
        let result = op(&conn);
        if let Err((_, e)) = conn.close() {
            warn!(path = %self.path.display(), error = %e, "Failed to close connection");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, RecordStore) {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path().join("patients.db")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_open_creates_file() {
        let (dir, store) = temp_store();
        assert!(store.path().exists());
        assert!(store.path().starts_with(dir.path()));
    }

    #[test]
    fn test_schema_initialized() {
        let (_dir, store) = temp_store();

        let tables: Vec<String> = store
            .with_connection(|conn| {
                let mut stmt =
                    conn.prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")?;
                let names = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(names)
            })
            .unwrap();

        assert_eq!(tables, vec![PATIENT_TABLE.to_string()]);
    }

    #[test]
    fn test_ensure_schema_idempotent() {
        let (_dir, store) = temp_store();
        assert!(store.ensure_schema().is_ok());
        assert!(store.ensure_schema().is_ok());
    }

    #[test]
    fn test_unreachable_path_is_not_connected() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path().join("missing").join("patients.db"));

        let err = store.ensure_schema().unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::NotConnected);

        // Later operations fail the same way
        let err = store.fetch_all().unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::NotConnected);
    }

    #[test]
    fn test_error_released_connection() {
        let (_dir, store) = temp_store();

        let result: StoreResult<()> =
            store.with_connection(|conn| Ok(conn.execute_batch("SELECT * FROM no_such_table")?));
        let err = result.unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::Backend);

        // The failed call did not leave the file locked
        assert!(store.fetch_all().is_ok());
    }
}
