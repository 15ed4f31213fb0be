pub mod dataset_history;
pub mod report;
pub mod summarizer;
pub mod upload_dataset;
