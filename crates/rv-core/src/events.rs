//! Gesture events crossing the engine boundary
//!
//! The embedding resolves raw pointer input into these events: it owns
//! hit testing against the scene it painted, the engine owns what the
//! hit means. Scene primitives carry their hit target so the embedding
//! can map a pointer position back to one.

use serde::{Deserialize, Serialize};

use crate::viewport::ZoomTransform;

/// What a pointer gesture landed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitTarget {
    /// A scatter point, identified by its index in the paired samples.
    Point(usize),
    /// A box or violin, identified by its category key.
    Group(String),
}

/// One user gesture, already resolved by the embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    /// Absolute zoom/pan transform for this event.
    Zoom(ZoomTransform),
    /// Click on a hit target.
    Click(HitTarget),
    /// Hover onto a target, or `None` when the pointer leaves.
    Hover(Option<HitTarget>),
    /// Reset button: identity transform and cleared selection.
    Reset,
}
