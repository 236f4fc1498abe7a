//! Patient records and data access for the registry plot engine

pub mod filter;
pub mod loader;
pub mod manifestation;
pub mod record;
pub mod sources;

use thiserror::Error;
use tokio::task::JoinError;

// Re-exports
pub use filter::{distribution_samples, scatter_pairs, CohortFilter, OnsetPair};
pub use loader::{LoadTicket, RegistryLoader};
pub use manifestation::Manifestation;
pub use record::{PatientRecord, Sex, TrackedVariant};
pub use sources::{CsvSource, MemorySource, RegistrySource};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Invalid value {value:?} in column {column} at row {row}")]
    InvalidValue {
        column: &'static str,
        value: String,
        row: usize,
    },

    #[error("Join error: {0}")]
    Join(#[from] JoinError),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<csv::Error> for RegistryError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => {
                RegistryError::Io(std::io::Error::new(io_err.kind(), error.to_string()))
            }
            _ => RegistryError::Csv(error.to_string()),
        }
    }
}
