//! Generation-guarded record loading
//!
//! Inputs can change while a fetch is in flight, so every load takes a
//! ticket from a request-generation counter and deliveries are applied
//! only while their ticket is still current. A stale delivery leaves
//! the stored state untouched.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use rv_core::load::{Generation, LoadState, RequestGeneration};

use crate::record::PatientRecord;
use crate::sources::RegistrySource;

/// Proof that a load was started; required to deliver its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(Generation);

/// Holds the latest patient set and guards it against stale deliveries.
#[derive(Default)]
pub struct RegistryLoader {
    generation: RequestGeneration,
    state: Arc<RwLock<LoadState<Arc<Vec<PatientRecord>>>>>,
}

impl RegistryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load attempt, invalidating earlier in-flight ones.
    pub fn begin(&self) -> LoadTicket {
        let generation = self.generation.begin();
        *self.state.write() = LoadState::Loading;
        debug!("load generation {} started", generation);
        LoadTicket(generation)
    }

    /// Deliver a completed load. Returns false (state untouched) when a
    /// newer load has begun since the ticket was issued.
    pub fn deliver(
        &self,
        ticket: LoadTicket,
        result: anyhow::Result<Vec<PatientRecord>>,
    ) -> bool {
        if !self.generation.is_current(ticket.0) {
            debug!(
                "discarding stale load generation {} (current is {})",
                ticket.0,
                self.generation.current()
            );
            return false;
        }
        match result {
            Ok(records) => {
                info!(
                    "load generation {} complete: {} records",
                    ticket.0,
                    records.len()
                );
                *self.state.write() = LoadState::Ready(Arc::new(records));
            }
            Err(error) => {
                warn!("load generation {} failed: {:#}", ticket.0, error);
                *self.state.write() = LoadState::Failed(error.to_string());
            }
        }
        true
    }

    /// Begin-fetch-deliver in one call. Returns false when the result
    /// arrived stale (another load started during the await).
    pub async fn run(&self, source: &dyn RegistrySource) -> bool {
        let ticket = self.begin();
        let result = source.fetch_patients().await;
        self.deliver(ticket, result)
    }

    /// Snapshot of the current load state.
    pub fn state(&self) -> LoadState<Arc<Vec<PatientRecord>>> {
        self.state.read().clone()
    }

    /// The latest successfully loaded records, if any.
    pub fn records(&self) -> Option<Arc<Vec<PatientRecord>>> {
        self.state.read().ready().cloned()
    }
}
