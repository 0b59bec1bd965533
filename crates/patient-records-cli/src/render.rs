//! Plain-text rendering of rows and charts.

use patient_records_core::{ChartKind, ChartSpec, PatientRow};

/// Column order used on screen.
const DISPLAY_COLUMNS: [(&str, &str); 8] = [
    ("doctors_id", "Doctors ID"),
    ("full_name", "Full name"),
    ("pesel", "Pesel"),
    ("age", "Age"),
    ("sex", "Sex"),
    ("disease", "Disease"),
    ("medication", "Medication"),
    ("add_date", "Added"),
];

pub fn row(row: &PatientRow) -> String {
    DISPLAY_COLUMNS
        .iter()
        .map(|(column, label)| {
            let value = row.get(column).map(|v| v.to_string()).unwrap_or_default();
            format!("{:>12}: {}", label, value)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn chart(chart: &ChartSpec) -> String {
    let mut out = format!("{}\n", chart.title);
    if chart.is_empty() {
        out.push_str("  (no patients)\n");
        return out;
    }

    let labels: Vec<String> = match chart.kind {
        ChartKind::Bar => chart.labels.clone(),
        ChartKind::Pie => chart.slice_labels(),
    }
    .into_iter()
    .map(|l| if l.is_empty() { "(none)".to_string() } else { l })
    .collect();
    let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    if let (Some(x), Some(y)) = (&chart.x_label, &chart.y_label) {
        out.push_str(&format!("  {:<width$}  {}\n", x, y, width = width));
    }
    for (label, count) in labels.iter().zip(&chart.counts) {
        out.push_str(&format!(
            "  {:<width$}  {:>4} {}\n",
            label,
            count,
            "#".repeat(*count),
            width = width
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use patient_records_core::stats::{gender_distribution_chart, yearly_registration_chart};
    use patient_records_core::{FieldValue, FrequencyTable};

    #[test]
    fn test_row_lists_known_columns() {
        let patient: PatientRow = [
            ("full_name", FieldValue::Text("Jan Kowalski".into())),
            ("age", FieldValue::Integer(25)),
        ]
        .into_iter()
        .collect();

        let text = row(&patient);
        assert!(text.contains("   Full name: Jan Kowalski"));
        assert!(text.contains("         Age: 25"));
        assert_eq!(text.lines().count(), 8);
    }

    #[test]
    fn test_bar_chart() {
        let table: FrequencyTable = ["2023", "2023", "2024"].into_iter().collect();
        let text = chart(&yearly_registration_chart(&table));

        assert!(text.starts_with("Yearly Patient Registrations\n"));
        assert!(text.contains("2023     2 ##\n"));
        assert!(text.contains("2024     1 #\n"));
    }

    #[test]
    fn test_pie_chart_shows_shares() {
        let table: FrequencyTable = ["Male", "Female", "Male"].into_iter().collect();
        let text = chart(&gender_distribution_chart(&table));
        assert!(text.contains("Male (66.7%)"));
    }

    #[test]
    fn test_empty_chart() {
        let text = chart(&yearly_registration_chart(&FrequencyTable::new()));
        assert!(text.contains("(no patients)"));
    }
}
