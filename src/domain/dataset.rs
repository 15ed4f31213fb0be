use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One stored row of an uploaded CSV, column name to typed cell value.
pub type DataRecord = serde_json::Map<String, serde_json::Value>;

/// Aggregate statistics derived from a dataset's rows.
///
/// Field declaration order is the serialization order, which callers
/// (API consumers and the report presenter) rely on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_count: i64,
    pub avg_flowrate: f64,
    pub avg_pressure: f64,
    pub avg_temperature: f64,
    /// Category name to row count. BTreeMap keeps the rendering order
    /// deterministic.
    pub equipment_type_distribution: BTreeMap<String, i64>,
}

/// One uploaded CSV: parsed rows plus the summary derived from them.
///
/// Created atomically on upload, never updated; removed only by the
/// retention sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub id: i64,
    pub filename: String,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
    pub summary: DatasetSummary,
    pub original_data: Vec<DataRecord>,
}
