//! Chart descriptions for the statistics windows.

use serde::{Deserialize, Serialize};

use super::FrequencyTable;

/// How a table should be drawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Pie,
}

/// Everything a charting component needs to draw one statistic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    /// Axis labels (bar charts only)
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub labels: Vec<String>,
    pub counts: Vec<usize>,
}

impl ChartSpec {
    fn from_table(kind: ChartKind, title: &str, table: &FrequencyTable) -> Self {
        Self {
            kind,
            title: title.to_string(),
            x_label: None,
            y_label: None,
            labels: table.keys().map(String::from).collect(),
            counts: table.counts().collect(),
        }
    }

    fn with_axes(mut self, x_label: &str, y_label: &str) -> Self {
        self.x_label = Some(x_label.to_string());
        self.y_label = Some(y_label.to_string());
        self
    }

    /// Share of the total for each label, in percent.
    pub fn percentages(&self) -> Vec<f64> {
        let total: usize = self.counts.iter().sum();
        if total == 0 {
            return Vec::new();
        }
        self.counts
            .iter()
            .map(|&n| n as f64 * 100.0 / total as f64)
            .collect()
    }

    /// Pie slice labels, e.g. `Male (66.7%)`.
    pub fn slice_labels(&self) -> Vec<String> {
        self.labels
            .iter()
            .zip(self.percentages())
            .map(|(label, pct)| format!("{} ({:.1}%)", label, pct))
            .collect()
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Bar chart of registrations per year.
pub fn yearly_registration_chart(table: &FrequencyTable) -> ChartSpec {
    ChartSpec::from_table(ChartKind::Bar, "Yearly Patient Registrations", table)
        .with_axes("Year", "Number of Registrations")
}

/// Bar chart of disease frequency.
pub fn disease_frequency_chart(table: &FrequencyTable) -> ChartSpec {
    ChartSpec::from_table(ChartKind::Bar, "Frequency of Diseases", table)
        .with_axes("Disease", "Number of Cases")
}

/// Pie chart of the sex distribution.
pub fn gender_distribution_chart(table: &FrequencyTable) -> ChartSpec {
    ChartSpec::from_table(ChartKind::Pie, "Gender Distribution of Patients", table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yearly_chart() {
        let table: FrequencyTable = ["2023", "2023", "2024"].into_iter().collect();
        let chart = yearly_registration_chart(&table);

        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.labels, vec!["2023", "2024"]);
        assert_eq!(chart.counts, vec![2, 1]);
        assert_eq!(chart.x_label.as_deref(), Some("Year"));
    }

    #[test]
    fn test_pie_percentages() {
        let table: FrequencyTable = ["Male", "Female", "Male"].into_iter().collect();
        let chart = gender_distribution_chart(&table);

        assert_eq!(chart.kind, ChartKind::Pie);
        assert!(chart.x_label.is_none());
        assert_eq!(chart.slice_labels(), vec!["Male (66.7%)", "Female (33.3%)"]);
    }

    #[test]
    fn test_to_json() {
        let table: FrequencyTable = ["Flu", "Flu"].into_iter().collect();
        let json = disease_frequency_chart(&table).to_json().unwrap();

        let parsed: ChartSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, disease_frequency_chart(&table));
        assert!(json.contains("\"kind\": \"bar\""));
    }

    #[test]
    fn test_empty_chart() {
        let chart = disease_frequency_chart(&FrequencyTable::new());
        assert!(chart.is_empty());
        assert!(chart.percentages().is_empty());
        assert!(chart.slice_labels().is_empty());
    }
}
