use std::sync::Arc;

use actix_web::dev::Server;
use tracing::info;

use crate::application::{DatasetHistoryUseCase, ReportUseCase, UploadDatasetUseCase};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::db::connection::init_db;
use crate::infrastructure::db::datasets::DatasetRepository;
use crate::interfaces::http::{start_server, AppState};

/// Wire the database, use cases and HTTP server together.
pub async fn setup(config: &AppConfig) -> Result<Server> {
    let pool = init_db(&config.database_url()).await?;
    info!(database = %config.database_path, "Dataset database ready");

    let repository = Arc::new(DatasetRepository::new(pool));

    let state = Arc::new(AppState {
        upload_use_case: UploadDatasetUseCase::new(repository.clone(), config.retention_keep),
        history_use_case: DatasetHistoryUseCase::new(repository.clone()),
        report_use_case: ReportUseCase::new(repository),
    });

    let server = start_server(state, &config.host, config.port).map_err(|e| {
        AppError::IoError(format!(
            "Failed to bind {}:{}: {}",
            config.host, config.port, e
        ))
    })?;

    info!(host = %config.host, port = config.port, "HTTP server started");
    Ok(server)
}
