//! Plot view implementations

// Band-oriented distribution plots
pub mod box_plot;
pub mod violin;

// Pairwise plots
pub mod scatter;

// Shared scaffolding
pub mod axes;
pub mod band;
pub mod layout;
pub mod overlay;

// Utilities
pub mod utils;

// Re-exports
pub use box_plot::{BoxPlotConfig, BoxPlotView};
pub use scatter::{ScatterPlotConfig, ScatterPlotView};
pub use violin::{ViolinPlotConfig, ViolinPlotView};

use serde::{Deserialize, Serialize};

/// The plot types the workspace can switch between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotKind {
    #[default]
    Box,
    Violin,
    Scatter,
}

impl PlotKind {
    /// Selector order.
    pub const ALL: [PlotKind; 3] = [PlotKind::Box, PlotKind::Violin, PlotKind::Scatter];

    pub fn key(self) -> &'static str {
        match self {
            PlotKind::Box => "box",
            PlotKind::Violin => "violin",
            PlotKind::Scatter => "scatter",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        PlotKind::ALL.into_iter().find(|k| k.key() == key)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PlotKind::Box => "Box Plot",
            PlotKind::Violin => "Violin Plot",
            PlotKind::Scatter => "Scatter Plot",
        }
    }
}
