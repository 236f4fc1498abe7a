//! Plot view abstraction - base trait for the interactive plot variants

use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use rv_core::GestureEvent;
use rv_data::{CohortFilter, Manifestation, PatientRecord, TrackedVariant};

use crate::plots::PlotKind;
use crate::scene::PlotScene;

/// Unique identifier for a plot view
pub type PlotViewId = Uuid;

/// What a click most recently landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectedEntity {
    /// Scatter point, by index into the current pair list
    Point(usize),
    /// Distribution band, by manifestation
    Category(Manifestation),
}

/// Base trait for all interactive plot views
pub trait PlotView: Send + Sync {
    /// Get the unique ID of this view
    fn id(&self) -> PlotViewId;

    /// Get the display name
    fn display_name(&self) -> &str;

    /// Get the plot variant
    fn kind(&self) -> PlotKind;

    /// Replace the patient records backing this view
    fn set_records(&mut self, records: Arc<Vec<PatientRecord>>);

    /// Replace the tracked variants overlaid on this view
    fn set_tracked(&mut self, tracked: Arc<Vec<TrackedVariant>>);

    /// Apply a cohort filter
    fn set_filter(&mut self, filter: CohortFilter);

    /// Feed one gesture into the interaction state
    fn handle_gesture(&mut self, event: &GestureEvent);

    /// Assemble the scene for the given output size
    fn scene(&self, width: f32, height: f32) -> PlotScene;

    /// Currently selected entity, if any
    fn selected_entity(&self) -> Option<SelectedEntity>;

    /// Drop transient interaction state (zoom, selection, hover)
    fn reset_interaction(&mut self);

    /// Save configuration
    fn save_config(&self) -> Value;

    /// Load configuration
    fn load_config(&mut self, config: Value);

    /// Get as any for downcasting
    fn as_any(&self) -> &dyn std::any::Any;

    /// Get as any mut for downcasting
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
