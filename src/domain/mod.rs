pub mod dataset;
pub mod error;

// CSV value objects
pub mod csv;
