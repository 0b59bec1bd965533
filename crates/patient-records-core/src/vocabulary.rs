//! Fixed disease vocabulary the intake form checks against.
//!
//! The list file holds comma-separated terms (`", "` separator), any number
//! per line.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use strsim::jaro_winkler;
use thiserror::Error;
use tracing::debug;

/// Minimum similarity for a term to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.85;

/// Vocabulary loading errors.
#[derive(Error, Debug)]
pub enum VocabularyError {
    #[error("Cannot read disease list {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Ordered set of permissible disease names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiseaseVocabulary {
    terms: Vec<String>,
    lookup: HashSet<String>,
}

impl DiseaseVocabulary {
    /// Load the vocabulary from a list file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let vocabulary = Self::parse(&content);
        debug!(terms = vocabulary.len(), path = %path.display(), "Loaded disease list");
        Ok(vocabulary)
    }

    /// Parse list file content.
    pub fn parse(content: &str) -> Self {
        Self::from_terms(content.lines().flat_map(|line| line.trim().split(", ")))
    }

    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Self::default();
        for term in terms {
            let term = term.as_ref().trim();
            if !term.is_empty() && vocabulary.lookup.insert(term.to_string()) {
                vocabulary.terms.push(term.to_string());
            }
        }
        vocabulary
    }

    /// Exact membership test.
    pub fn contains(&self, term: &str) -> bool {
        self.lookup.contains(term)
    }

    /// Closest known term, if any is similar enough.
    pub fn suggest(&self, term: &str) -> Option<&str> {
        let needle = term.to_lowercase();
        self.terms
            .iter()
            .map(|t| (t, jaro_winkler(&needle, &t.to_lowercase())))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(t, _)| t.as_str())
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
