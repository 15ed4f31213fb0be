// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV parsing and encoding fallback for uploaded files

mod csv_parser;

pub use csv_parser::{CsvParser, ParsedCsv};
