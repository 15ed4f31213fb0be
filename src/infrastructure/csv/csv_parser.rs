// ============================================================
// CSV PARSER
// ============================================================
// Parse uploaded CSV bytes with encoding fallback and error handling

use crate::domain::csv::{CsvField, CsvRow};
use crate::domain::error::{AppError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};

/// Headers plus data rows of a parsed upload.
#[derive(Debug, Clone)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
}

/// CSV parser for uploaded files
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from values
    trim: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    #[allow(dead_code)]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse an uploaded file body.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParsedCsv> {
        let content = Self::decode(bytes);
        self.parse_content(&content)
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<ParsedCsv> {
        if content.trim().is_empty() {
            return Err(AppError::ParseError("CSV file is empty".to_string()));
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        let mut rows = Vec::new();
        let mut index = 0;

        for result in reader.records() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            rows.push(Self::parse_row(index, &headers, &record));
            index += 1;
        }

        Ok(ParsedCsv {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        })
    }

    /// Decode upload bytes, falling back to lossy UTF-8 for odd encodings.
    fn decode(bytes: &[u8]) -> String {
        let (content, _, had_errors) = encoding_rs::UTF_8.decode(bytes);
        if had_errors {
            String::from_utf8_lossy(bytes).to_string()
        } else {
            content.to_string()
        }
    }

    /// Parse a single CSV row
    fn parse_row(index: usize, headers: &StringRecord, record: &StringRecord) -> CsvRow {
        let mut fields = Vec::new();

        for (idx, header) in headers.iter().enumerate() {
            let value = record.get(idx).unwrap_or("").to_string();
            fields.push(CsvField::new(header.to_string(), value));
        }

        CsvRow::new(index, fields)
    }
}
