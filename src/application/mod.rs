pub mod use_cases;

pub use use_cases::dataset_history::DatasetHistoryUseCase;
pub use use_cases::report::ReportUseCase;
pub use use_cases::upload_dataset::UploadDatasetUseCase;
