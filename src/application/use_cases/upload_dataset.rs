use crate::application::use_cases::summarizer::summarize;
use crate::domain::dataset::{DataRecord, Dataset};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::db::datasets::DatasetRepository;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

static CSV_FILENAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.csv$").unwrap());

#[derive(Debug, Validate)]
struct UploadRequest {
    #[validate(length(min = 1, max = 255), regex(path = *CSV_FILENAME_PATTERN))]
    filename: String,
}

pub struct UploadDatasetUseCase {
    repository: Arc<DatasetRepository>,
    parser: CsvParser,
    keep_latest: u32,
}

impl UploadDatasetUseCase {
    pub fn new(repository: Arc<DatasetRepository>, keep_latest: u32) -> Self {
        Self {
            repository,
            parser: CsvParser::new(),
            keep_latest,
        }
    }

    /// Run the whole upload pipeline: validate, parse, summarize, store,
    /// then sweep datasets beyond the retention window.
    pub async fn execute(&self, filename: &str, bytes: &[u8]) -> Result<Dataset> {
        let filename = filename.trim();
        let request = UploadRequest {
            filename: filename.to_string(),
        };
        if request.validate().is_err() {
            return Err(AppError::ValidationError(
                "A .csv file is required.".to_string(),
            ));
        }
        if bytes.is_empty() {
            return Err(AppError::ParseError("CSV file is empty".to_string()));
        }

        let parsed = self.parser.parse_bytes(bytes)?;
        let summary = summarize(&parsed.headers, &parsed.rows)?;
        let records: Vec<DataRecord> = parsed.rows.iter().map(|row| row.to_record()).collect();

        let dataset = self.repository.insert(filename, &summary, &records).await?;

        let pruned = self.repository.prune(self.keep_latest).await?;
        if pruned > 0 {
            info!(pruned, dataset_id = dataset.id, "Retention sweep removed old datasets");
        }

        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::connection::apply_schema;
    use sqlx::sqlite::SqlitePoolOptions;

    const VALID_CSV: &str =
        "Flowrate,Pressure,Temperature,Type\n10,1.0,300,Pump\n20,3.0,310,Valve\n30,5.0,320,Pump\n";

    async fn use_case() -> (UploadDatasetUseCase, Arc<DatasetRepository>) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        apply_schema(&pool).await.expect("schema");
        let repository = Arc::new(DatasetRepository::new(pool));
        (
            UploadDatasetUseCase::new(repository.clone(), 5),
            repository,
        )
    }

    #[tokio::test]
    async fn test_upload_summarizes_and_stores() {
        let (use_case, _) = use_case().await;

        let dataset = use_case
            .execute("plant.csv", VALID_CSV.as_bytes())
            .await
            .unwrap();

        assert_eq!(dataset.summary.total_count, 3);
        assert!((dataset.summary.avg_pressure - 3.0).abs() < 1e-9);
        assert_eq!(dataset.summary.equipment_type_distribution["Pump"], 2);
        assert_eq!(dataset.original_data.len(), 3);
        assert_eq!(
            dataset.original_data[0]["Type"],
            serde_json::json!("Pump")
        );
    }

    #[tokio::test]
    async fn test_non_csv_filename_is_rejected() {
        let (use_case, repository) = use_case().await;

        let err = use_case
            .execute("plant.xlsx", VALID_CSV.as_bytes())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(err.to_string(), "A .csv file is required.");
        assert_eq!(repository.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_column_creates_no_dataset() {
        let (use_case, repository) = use_case().await;
        let csv = "Flowrate,Pressure,Type\n10,1.0,Pump\n";

        let err = use_case.execute("plant.csv", csv.as_bytes()).await.unwrap_err();

        match err {
            AppError::MissingColumn(name) => assert_eq!(name, "Temperature"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
        assert_eq!(repository.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_seven_uploads_leave_five() {
        let (use_case, repository) = use_case().await;

        for i in 0..7 {
            use_case
                .execute(&format!("upload_{}.csv", i), VALID_CSV.as_bytes())
                .await
                .unwrap();
        }

        let names: Vec<String> = repository
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.filename)
            .collect();
        assert_eq!(
            names,
            vec![
                "upload_6.csv",
                "upload_5.csv",
                "upload_4.csv",
                "upload_3.csv",
                "upload_2.csv"
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_body_is_rejected() {
        let (use_case, repository) = use_case().await;

        let err = use_case.execute("plant.csv", b"").await.unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
        assert_eq!(repository.count().await.unwrap(), 0);
    }
}
