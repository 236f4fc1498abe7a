//! Stale-load protection
//!
//! Data loads finish asynchronously while inputs keep changing. Every
//! load begins by taking a generation number from a monotonically
//! increasing counter; a completion is only applied while its generation
//! is still the current one. The latest generation wins regardless of
//! arrival order.

use std::sync::atomic::{AtomicU64, Ordering};

/// Generation number handed out for one load attempt.
pub type Generation = u64;

/// Monotonically increasing request-generation counter.
#[derive(Debug, Default)]
pub struct RequestGeneration(AtomicU64);

impl RequestGeneration {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Start a new load attempt, invalidating all earlier ones.
    pub fn begin(&self) -> Generation {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current(&self) -> Generation {
        self.0.load(Ordering::SeqCst)
    }

    /// Whether a completion carrying `generation` may still be applied.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.current() == generation
    }
}

/// Lifecycle of one asynchronously loaded value.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    /// No load started yet.
    Idle,
    /// A load is in flight.
    Loading,
    /// The latest load completed.
    Ready(T),
    /// The latest load failed; the message is renderable.
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
