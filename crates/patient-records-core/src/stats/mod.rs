//! Registration statistics.
//!
//! Pure functions turning fetched rows into frequency tables, and the chart
//! descriptions handed to whatever draws them.

mod chart;

pub use chart::*;

use std::collections::HashMap;

use serde::{Serialize, Serializer};
use serde::ser::SerializeMap;

use crate::models::{FieldValue, PatientRow};

/// Group key → count, iterating in order of first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `key`.
    pub fn increment(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    /// Count for `key`; zero when it never occurred.
    pub fn get(&self, key: &str) -> usize {
        self.index.get(key).map_or(0, |&pos| self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), *n))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|(_, n)| *n)
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts().sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export to JSON, keys in first-occurrence order.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> FromIterator<&'a str> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut table = Self::new();
        for key in iter {
            table.increment(key);
        }
        table
    }
}

impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

/// Key of a row for one column: the text value, the number rendered as
/// text, or the empty string when missing or NULL.
fn column_key(row: &PatientRow, column: &str) -> String {
    match row.get(column) {
        None | Some(FieldValue::Null) => String::new(),
        Some(value) => value.to_string(),
    }
}

fn group_by(rows: &[PatientRow], key: impl Fn(&PatientRow) -> String) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for row in rows {
        table.increment(&key(row));
    }
    table
}

/// Registrations per year, keyed by the part of `add_date` before the first `-`.
pub fn group_by_registration_year(rows: &[PatientRow]) -> FrequencyTable {
    group_by(rows, |row| {
        let date = column_key(row, "add_date");
        match date.split_once('-') {
            Some((year, _)) => year.to_string(),
            None => date,
        }
    })
}

/// Patients per literal `sex` value.
pub fn group_by_sex(rows: &[PatientRow]) -> FrequencyTable {
    group_by(rows, |row| column_key(row, "sex"))
}

/// Patients per literal `disease` value; the empty string is a key of its own.
pub fn group_by_disease(rows: &[PatientRow]) -> FrequencyTable {
    group_by(rows, |row| column_key(row, "disease"))
}
