// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Core types and value objects for parsed CSV content
// No I/O, no async, no external dependencies

mod csv_row;

pub use csv_row::{CsvField, CsvRow};
