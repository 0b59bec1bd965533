//! Application configuration.
//!
//! Resolved once at startup by the front end and passed into the core. The
//! core itself reads no environment variables.

use std::path::{Path, PathBuf};

/// Database file used when nothing else is configured.
pub const DEFAULT_DATABASE_PATH: &str = "patientDatabase.db";

/// Disease list used when nothing else is configured.
pub const DEFAULT_DISEASE_LIST_PATH: &str = "disease.txt";

/// Paths the application works with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    database_path: PathBuf,
    disease_list_path: PathBuf,
}

impl AppConfig {
    pub fn new(database_path: PathBuf, disease_list_path: PathBuf) -> Self {
        Self {
            database_path,
            disease_list_path,
        }
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    pub fn disease_list_path(&self) -> &Path {
        &self.disease_list_path
    }

    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    pub fn with_disease_list_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.disease_list_path = path.into();
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(
            PathBuf::from(DEFAULT_DATABASE_PATH),
            PathBuf::from(DEFAULT_DISEASE_LIST_PATH),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.database_path(), Path::new("patientDatabase.db"));
        assert_eq!(config.disease_list_path(), Path::new("disease.txt"));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default()
            .with_database_path("/tmp/clinic.db")
            .with_disease_list_path("/tmp/diseases.txt");
        assert_eq!(config.database_path(), Path::new("/tmp/clinic.db"));
        assert_eq!(config.disease_list_path(), Path::new("/tmp/diseases.txt"));
    }
}
