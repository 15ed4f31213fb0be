use crate::domain::dataset::Dataset;
use crate::domain::error::Result;
use crate::infrastructure::db::datasets::DatasetRepository;
use std::sync::Arc;

pub struct DatasetHistoryUseCase {
    repository: Arc<DatasetRepository>,
}

impl DatasetHistoryUseCase {
    pub fn new(repository: Arc<DatasetRepository>) -> Self {
        Self { repository }
    }

    /// All retained datasets, most recent first.
    pub async fn history(&self) -> Result<Vec<Dataset>> {
        self.repository.list().await
    }

    /// One dataset by id.
    pub async fn get(&self, id: i64) -> Result<Dataset> {
        self.repository.get(id).await
    }
}
