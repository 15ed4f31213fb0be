use crate::domain::dataset::Dataset;
use crate::domain::error::Result;
use crate::infrastructure::db::datasets::DatasetRepository;
use crate::infrastructure::pdf::render_report;
use std::sync::Arc;

/// A finished report ready to hand to the client.
pub struct ReportDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// One line of the rendered report. The variant decides font and indent.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportLine {
    Title(String),
    Heading(String),
    Field(String),
    SubItem(String),
}

impl ReportLine {
    pub fn text(&self) -> &str {
        match self {
            ReportLine::Title(text)
            | ReportLine::Heading(text)
            | ReportLine::Field(text)
            | ReportLine::SubItem(text) => text,
        }
    }
}

/// Lay out a dataset as report lines.
///
/// Field order is fixed: total_count, avg_flowrate, avg_pressure,
/// avg_temperature, then the equipment distribution expanded as an
/// indented list. Floats render with two decimals, counts as integers.
pub fn report_lines(dataset: &Dataset) -> Vec<ReportLine> {
    let summary = &dataset.summary;
    let mut lines = vec![
        ReportLine::Title(format!("Analysis Report for: {}", dataset.filename)),
        ReportLine::Heading("Summary Statistics".to_string()),
        ReportLine::Field(format!(
            "{}: {}",
            field_label("total_count"),
            summary.total_count
        )),
        ReportLine::Field(format!(
            "{}: {:.2}",
            field_label("avg_flowrate"),
            summary.avg_flowrate
        )),
        ReportLine::Field(format!(
            "{}: {:.2}",
            field_label("avg_pressure"),
            summary.avg_pressure
        )),
        ReportLine::Field(format!(
            "{}: {:.2}",
            field_label("avg_temperature"),
            summary.avg_temperature
        )),
        ReportLine::Field(format!(
            "{}:",
            field_label("equipment_type_distribution")
        )),
    ];

    for (name, count) in &summary.equipment_type_distribution {
        lines.push(ReportLine::SubItem(format!("- {}: {}", name, count)));
    }

    lines
}

/// Turn a snake_case summary key into its report label ("avg_pressure"
/// becomes "Avg Pressure").
fn field_label(key: &str) -> String {
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub struct ReportUseCase {
    repository: Arc<DatasetRepository>,
}

impl ReportUseCase {
    pub fn new(repository: Arc<DatasetRepository>) -> Self {
        Self { repository }
    }

    /// Render the PDF report for one dataset.
    pub async fn execute(&self, id: i64) -> Result<ReportDocument> {
        let dataset = self.repository.get(id).await?;
        let bytes = render_report(&report_lines(&dataset))?;

        Ok(ReportDocument {
            filename: format!("report_{}.pdf", dataset.id),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::DatasetSummary;
    use std::collections::BTreeMap;

    fn sample_dataset() -> Dataset {
        let mut distribution = BTreeMap::new();
        distribution.insert("Pump".to_string(), 3);
        distribution.insert("Valve".to_string(), 2);

        Dataset {
            id: 7,
            filename: "plant_data.csv".to_string(),
            uploaded_at: chrono::Utc::now(),
            summary: DatasetSummary {
                total_count: 5,
                avg_flowrate: 10.0,
                avg_pressure: 12.345,
                avg_temperature: 299.999,
                equipment_type_distribution: distribution,
            },
            original_data: Vec::new(),
        }
    }

    #[test]
    fn test_floats_render_with_two_decimals() {
        let lines = report_lines(&sample_dataset());
        let texts: Vec<&str> = lines.iter().map(|l| l.text()).collect();

        assert!(texts.contains(&"Avg Pressure: 12.35"));
        assert!(texts.contains(&"Avg Temperature: 300.00"));
    }

    #[test]
    fn test_total_count_renders_as_integer() {
        let lines = report_lines(&sample_dataset());
        assert!(lines.iter().any(|l| l.text() == "Total Count: 5"));
    }

    #[test]
    fn test_line_order_is_fixed() {
        let lines = report_lines(&sample_dataset());
        let texts: Vec<&str> = lines.iter().map(|l| l.text()).collect();

        assert_eq!(
            texts,
            vec![
                "Analysis Report for: plant_data.csv",
                "Summary Statistics",
                "Total Count: 5",
                "Avg Flowrate: 10.00",
                "Avg Pressure: 12.35",
                "Avg Temperature: 300.00",
                "Equipment Type Distribution:",
                "- Pump: 3",
                "- Valve: 2",
            ]
        );
    }

    #[test]
    fn test_distribution_entries_are_sub_items() {
        let lines = report_lines(&sample_dataset());
        let sub_items: Vec<&ReportLine> = lines
            .iter()
            .filter(|l| matches!(l, ReportLine::SubItem(_)))
            .collect();
        assert_eq!(sub_items.len(), 2);
    }

    #[test]
    fn test_field_label() {
        assert_eq!(field_label("avg_pressure"), "Avg Pressure");
        assert_eq!(
            field_label("equipment_type_distribution"),
            "Equipment Type Distribution"
        );
    }
}
