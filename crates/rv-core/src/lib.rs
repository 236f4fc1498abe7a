//! Core interaction state for the registry plot engine
//!
//! This crate provides the scale, viewport, and selection abstractions
//! every plot variant builds on. It knows nothing about patients or
//! plot geometry; those live in the data and view crates.

pub mod events;
pub mod load;
pub mod scale;
pub mod selection;
pub mod viewport;

// Re-export commonly used types
pub use events::{GestureEvent, HitTarget};
pub use load::{Generation, LoadState, RequestGeneration};
pub use scale::{BandScale, LinearScale};
pub use selection::SelectionState;
pub use viewport::{ViewportController, ZoomAxes, ZoomTransform};
