//! Plot views for the registry plot engine
//!
//! Views turn loaded patient records plus interaction state into
//! drawable scenes. Rendering and widget concerns stay outside; a host
//! walks the scene primitives and paints them with whatever backend it
//! uses.

mod plot_view;
pub mod plots;
mod scene;
mod stats_panel;
mod workspace;

pub use plot_view::{PlotView, PlotViewId, SelectedEntity};
pub use plots::{
    BoxPlotConfig, BoxPlotView, PlotKind, ScatterPlotConfig, ScatterPlotView, ViolinPlotConfig,
    ViolinPlotView,
};
pub use scene::{PlotScene, Primitive, Rect, Stroke, TextAnchor, Tooltip};
pub use stats_panel::{stat_rows, StatRow, StatsScope};
pub use workspace::PlotWorkspace;
