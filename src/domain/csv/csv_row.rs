// ============================================================
// CSV ROW TYPES
// ============================================================
// Data structures representing parsed CSV content

use crate::domain::dataset::DataRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single field in a CSV row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvField {
    /// Field name (header)
    pub name: String,

    /// Field value
    pub value: String,

    /// Whether the value is empty
    pub is_empty: bool,

    /// Whether the value appears to be numeric
    pub is_numeric: bool,
}

impl CsvField {
    /// Create a new CSV field
    pub fn new(name: String, value: String) -> Self {
        let is_empty = value.trim().is_empty();
        let is_numeric = Self::is_numeric_value(&value);

        Self {
            name,
            value,
            is_empty,
            is_numeric,
        }
    }

    /// Check if a string value is numeric
    fn is_numeric_value(value: &str) -> bool {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return false;
        }

        trimmed.parse::<f64>().is_ok() || trimmed.parse::<i64>().is_ok()
    }

    /// The cell as a JSON value: integer, then float, then string.
    /// Empty cells become null so stored records keep their shape.
    pub fn typed_value(&self) -> serde_json::Value {
        let trimmed = self.value.trim();
        if trimmed.is_empty() {
            return serde_json::Value::Null;
        }
        if let Ok(int) = trimmed.parse::<i64>() {
            return serde_json::Value::from(int);
        }
        if let Ok(float) = trimmed.parse::<f64>() {
            return serde_json::Value::from(float);
        }
        serde_json::Value::from(self.value.as_str())
    }
}

/// A single row in a CSV file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvRow {
    /// Row index (0-based)
    pub index: usize,

    /// All fields in this row
    pub fields: Vec<CsvField>,

    /// Field map for easy access
    pub field_map: HashMap<String, String>,
}

impl CsvRow {
    /// Create a new CSV row
    pub fn new(index: usize, fields: Vec<CsvField>) -> Self {
        let field_map = fields
            .iter()
            .filter(|f| !f.is_empty)
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect();

        Self {
            index,
            fields,
            field_map,
        }
    }

    /// Look up a cell by column name; empty cells return None.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.field_map.get(column).map(|v| v.as_str())
    }

    /// Convert this row into a storable record of typed values.
    pub fn to_record(&self) -> DataRecord {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.typed_value()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_value_integer_and_float() {
        let int_field = CsvField::new("Flowrate".to_string(), "42".to_string());
        assert_eq!(int_field.typed_value(), serde_json::json!(42));

        let float_field = CsvField::new("Pressure".to_string(), "3.5".to_string());
        assert_eq!(float_field.typed_value(), serde_json::json!(3.5));
    }

    #[test]
    fn test_typed_value_string_and_empty() {
        let text_field = CsvField::new("Type".to_string(), "Pump".to_string());
        assert_eq!(text_field.typed_value(), serde_json::json!("Pump"));

        let empty_field = CsvField::new("Type".to_string(), "  ".to_string());
        assert!(empty_field.is_empty);
        assert_eq!(empty_field.typed_value(), serde_json::Value::Null);
    }

    #[test]
    fn test_row_lookup_skips_empty_cells() {
        let row = CsvRow::new(
            0,
            vec![
                CsvField::new("Flowrate".to_string(), "10".to_string()),
                CsvField::new("Type".to_string(), "".to_string()),
            ],
        );

        assert_eq!(row.get("Flowrate"), Some("10"));
        assert_eq!(row.get("Type"), None);
    }

    #[test]
    fn test_to_record_preserves_all_columns() {
        let row = CsvRow::new(
            0,
            vec![
                CsvField::new("Flowrate".to_string(), "10.5".to_string()),
                CsvField::new("Type".to_string(), "Valve".to_string()),
            ],
        );

        let record = row.to_record();
        assert_eq!(record.len(), 2);
        assert_eq!(record["Flowrate"], serde_json::json!(10.5));
        assert_eq!(record["Type"], serde_json::json!("Valve"));
    }
}
