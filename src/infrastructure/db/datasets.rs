use crate::domain::dataset::{DataRecord, Dataset, DatasetSummary};
use crate::domain::error::{AppError, Result};
use sqlx::sqlite::SqlitePool;

pub struct DatasetRepository {
    pool: SqlitePool,
}

impl DatasetRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a freshly summarized upload and return it with its assigned id.
    pub async fn insert(
        &self,
        filename: &str,
        summary: &DatasetSummary,
        records: &[DataRecord],
    ) -> Result<Dataset> {
        let uploaded_at = chrono::Utc::now();
        let summary_json = serde_json::to_string(summary)
            .map_err(|e| AppError::Internal(format!("Failed to serialize summary: {}", e)))?;
        let data_json = serde_json::to_string(records)
            .map_err(|e| AppError::Internal(format!("Failed to serialize rows: {}", e)))?;

        let result = sqlx::query(
            "INSERT INTO datasets (filename, uploaded_at, summary, original_data)
             VALUES (?, ?, ?, ?)",
        )
        .bind(filename)
        .bind(uploaded_at)
        .bind(&summary_json)
        .bind(&data_json)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to insert dataset: {}", e)))?;

        Ok(Dataset {
            id: result.last_insert_rowid(),
            filename: filename.to_string(),
            uploaded_at,
            summary: summary.clone(),
            original_data: records.to_vec(),
        })
    }

    /// All datasets, most recent first.
    pub async fn list(&self) -> Result<Vec<Dataset>> {
        let rows = sqlx::query_as::<_, DatasetEntity>(
            "SELECT id, filename, uploaded_at, summary, original_data FROM datasets \
             ORDER BY uploaded_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list datasets: {}", e)))?;

        rows.into_iter().map(Dataset::try_from).collect()
    }

    pub async fn get(&self, id: i64) -> Result<Dataset> {
        let row = sqlx::query_as::<_, DatasetEntity>(
            "SELECT id, filename, uploaded_at, summary, original_data FROM datasets WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch dataset: {}", e)))?;

        match row {
            Some(entity) => Dataset::try_from(entity),
            None => Err(AppError::NotFound("Dataset not found".to_string())),
        }
    }

    /// Retention sweep: drop everything outside the `keep` most recent rows.
    ///
    /// One statement, so a sweep never leaves fewer than `keep` rows behind
    /// and concurrent sweeps converge on the same survivors.
    pub async fn prune(&self, keep: u32) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM datasets WHERE id NOT IN \
             (SELECT id FROM datasets ORDER BY uploaded_at DESC, id DESC LIMIT ?)",
        )
        .bind(i64::from(keep))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to prune datasets: {}", e)))?;

        Ok(result.rows_affected())
    }

    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM datasets")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to count datasets: {}", e)))
    }
}

// Internal entity for database mapping
#[derive(sqlx::FromRow)]
struct DatasetEntity {
    id: i64,
    filename: String,
    uploaded_at: chrono::DateTime<chrono::Utc>,
    summary: String,
    original_data: String,
}

impl TryFrom<DatasetEntity> for Dataset {
    type Error = AppError;

    fn try_from(entity: DatasetEntity) -> Result<Dataset> {
        let summary: DatasetSummary = serde_json::from_str(&entity.summary)
            .map_err(|e| AppError::DatabaseError(format!("Corrupt summary column: {}", e)))?;
        let original_data: Vec<DataRecord> = serde_json::from_str(&entity.original_data)
            .map_err(|e| AppError::DatabaseError(format!("Corrupt original_data column: {}", e)))?;

        Ok(Dataset {
            id: entity.id,
            filename: entity.filename,
            uploaded_at: entity.uploaded_at,
            summary,
            original_data,
        })
    }
}
