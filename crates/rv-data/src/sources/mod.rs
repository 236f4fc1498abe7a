//! Data sources for patient records

mod csv_source;

pub use csv_source::CsvSource;

use async_trait::async_trait;

use crate::record::PatientRecord;

/// Trait for registry data sources
#[async_trait]
pub trait RegistrySource: Send + Sync {
    /// Fetch the complete patient set. Subgroup filtering happens
    /// engine-side, so sources always hand over everything.
    async fn fetch_patients(&self) -> anyhow::Result<Vec<PatientRecord>>;

    /// Source name for diagnostics
    fn source_name(&self) -> &str;
}

/// In-memory source for tests and demo data.
pub struct MemorySource {
    name: String,
    records: Vec<PatientRecord>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, records: Vec<PatientRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }
}

#[async_trait]
impl RegistrySource for MemorySource {
    async fn fetch_patients(&self) -> anyhow::Result<Vec<PatientRecord>> {
        Ok(self.records.clone())
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}
