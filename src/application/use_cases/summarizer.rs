use crate::domain::csv::CsvRow;
use crate::domain::dataset::DatasetSummary;
use crate::domain::error::{AppError, Result};
use std::collections::BTreeMap;

/// Columns every upload must carry: three numeric, one categorical.
pub const FLOWRATE_COLUMN: &str = "Flowrate";
pub const PRESSURE_COLUMN: &str = "Pressure";
pub const TEMPERATURE_COLUMN: &str = "Temperature";
pub const TYPE_COLUMN: &str = "Type";

const REQUIRED_COLUMNS: [&str; 4] = [
    FLOWRATE_COLUMN,
    PRESSURE_COLUMN,
    TEMPERATURE_COLUMN,
    TYPE_COLUMN,
];

/// Compute the summary statistics for an upload.
///
/// Pure function of the parsed rows: row count, per-column means and the
/// equipment type distribution. Empty cells are skipped in the means and
/// in the distribution; a non-numeric cell in a numeric column is a
/// parse error naming the offending row.
pub fn summarize(headers: &[String], rows: &[CsvRow]) -> Result<DatasetSummary> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(AppError::MissingColumn(column.to_string()));
        }
    }

    let mut distribution: BTreeMap<String, i64> = BTreeMap::new();
    for row in rows {
        if let Some(kind) = row.get(TYPE_COLUMN) {
            *distribution.entry(kind.to_string()).or_insert(0) += 1;
        }
    }

    Ok(DatasetSummary {
        total_count: rows.len() as i64,
        avg_flowrate: column_mean(rows, FLOWRATE_COLUMN)?,
        avg_pressure: column_mean(rows, PRESSURE_COLUMN)?,
        avg_temperature: column_mean(rows, TEMPERATURE_COLUMN)?,
        equipment_type_distribution: distribution,
    })
}

/// Mean over the non-empty cells of one numeric column. No values yields 0.0.
fn column_mean(rows: &[CsvRow], column: &str) -> Result<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;

    for row in rows {
        let Some(value) = row.get(column) else {
            continue;
        };
        let parsed: f64 = value.parse().map_err(|_| {
            AppError::ParseError(format!(
                "Column '{}' has a non-numeric value '{}' in row {}",
                column,
                value,
                row.index + 1
            ))
        })?;
        sum += parsed;
        count += 1;
    }

    if count == 0 {
        return Ok(0.0);
    }
    Ok(sum / count as f64)
}
