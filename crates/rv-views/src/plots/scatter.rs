//! Scatter plot of paired onset ages
//!
//! Each point is one patient with both selected manifestations
//! recorded. Zoom rescales both axes; clicking a point toggles its
//! selection; a least squares fit is drawn whenever it is defined.

use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use rv_core::{GestureEvent, HitTarget, LinearScale, SelectionState, ViewportController, ZoomAxes};
use rv_data::{
    scatter_pairs, CohortFilter, Manifestation, OnsetPair, PatientRecord, TrackedVariant,
};

use crate::plot_view::{PlotView, PlotViewId, SelectedEntity};
use crate::plots::axes::{self, ValueFormat};
use crate::plots::layout::{PlotFrame, DEFAULT_MARGINS};
use crate::plots::overlay::OverlayProjector;
use crate::plots::utils::colors;
use crate::plots::utils::stats::{self, Regression};
use crate::plots::PlotKind;
use crate::scene::{PlotScene, Primitive, Stroke};

const POINT_RADIUS: f32 = 5.0;
const HOVER_RADIUS: f32 = 7.0;

/// Configuration for scatter plot view
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlotConfig {
    /// Manifestation on the x axis
    pub x_field: Manifestation,

    /// Manifestation on the y axis
    pub y_field: Manifestation,

    /// Whether to show gridlines
    pub show_grid: bool,
}

impl Default for ScatterPlotConfig {
    fn default() -> Self {
        Self {
            x_field: Manifestation::DiabetesMellitus,
            y_field: Manifestation::OpticAtrophy,
            show_grid: true,
        }
    }
}

/// Scatter plot view
pub struct ScatterPlotView {
    id: PlotViewId,
    title: String,
    pub config: ScatterPlotConfig,

    // State
    records: Arc<Vec<PatientRecord>>,
    tracked: Arc<Vec<TrackedVariant>>,
    filter: CohortFilter,
    viewport: ViewportController,
    selection: SelectionState<usize>,
    hovered: Option<usize>,
}

impl ScatterPlotView {
    pub fn new(id: PlotViewId, title: String) -> Self {
        Self {
            id,
            title,
            config: ScatterPlotConfig::default(),
            records: Arc::new(Vec::new()),
            tracked: Arc::new(Vec::new()),
            filter: CohortFilter::default(),
            viewport: ViewportController::new(ZoomAxes::Both),
            selection: SelectionState::Unselected,
            hovered: None,
        }
    }

    /// Paired samples for the current fields and cohort filter.
    fn pairs(&self) -> Vec<OnsetPair> {
        scatter_pairs(
            &self.records,
            &self.filter,
            self.config.x_field,
            self.config.y_field,
        )
    }

    fn push_points(&self, scene: &mut PlotScene, pairs: &[OnsetPair], x: &LinearScale, y: &LinearScale) {
        let selected = self.selection.selected().copied();
        for (i, pair) in pairs.iter().enumerate() {
            let is_selected = selected == Some(i);
            let is_hovered = self.hovered == Some(i);
            let opacity = if is_selected || is_hovered { 0.8 } else { 0.6 };
            scene.marks.push(Primitive::Circle {
                center: [x.map(pair.x), y.map(pair.y)],
                radius: if is_hovered { HOVER_RADIUS } else { POINT_RADIUS },
                fill: Some(colors::PERIWINKLE.with_opacity(opacity)),
                stroke: Some(Stroke::solid(
                    1.0,
                    if is_selected {
                        colors::ACCENT_RED
                    } else {
                        colors::WHITE
                    },
                )),
                hit: Some(HitTarget::Point(i)),
            });
        }
    }

    fn push_regression(
        &self,
        scene: &mut PlotScene,
        fit: Regression,
        x_extent: (f64, f64),
        x: &LinearScale,
        y: &LinearScale,
    ) {
        let (x0, x1) = x_extent;
        scene.marks.push(Primitive::line(
            [x.map(x0), y.map(fit.slope * x0 + fit.intercept)],
            [x.map(x1), y.map(fit.slope * x1 + fit.intercept)],
            Stroke::solid(2.0, colors::INDIGO),
        ));
    }

    fn push_tracked(&self, scene: &mut PlotScene, x: &LinearScale, y: &LinearScale) {
        // Tracked variants ignore the cohort filter here; both fields
        // must be recorded for the marker to have a position.
        let projector = OverlayProjector::new(scene.plot_area).with_label_offset(10.0);
        for (index, variant) in self.tracked.iter().enumerate() {
            let (Some(vx), Some(vy)) = (
                variant.onset(self.config.x_field),
                variant.onset(self.config.y_field),
            ) else {
                continue;
            };
            projector.push_point_marker(
                scene,
                [x.map(vx), y.map(vy)],
                &variant.display_name(index),
            );
        }
    }
}

impl PlotView for ScatterPlotView {
    fn id(&self) -> PlotViewId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn kind(&self) -> PlotKind {
        PlotKind::Scatter
    }

    fn set_records(&mut self, records: Arc<Vec<PatientRecord>>) {
        self.records = records;
    }

    fn set_tracked(&mut self, tracked: Arc<Vec<TrackedVariant>>) {
        self.tracked = tracked;
    }

    fn set_filter(&mut self, filter: CohortFilter) {
        self.filter = filter;
    }

    fn handle_gesture(&mut self, event: &GestureEvent) {
        match event {
            GestureEvent::Zoom(transform) => self.viewport.apply(*transform),
            GestureEvent::Click(HitTarget::Point(index)) => {
                let now_selected = self.selection.toggle(*index);
                debug!(
                    "scatter point {} {}",
                    index,
                    if now_selected { "selected" } else { "deselected" }
                );
            }
            GestureEvent::Click(HitTarget::Group(_)) => {}
            GestureEvent::Hover(Some(HitTarget::Point(index))) => self.hovered = Some(*index),
            GestureEvent::Hover(_) => self.hovered = None,
            GestureEvent::Reset => self.reset_interaction(),
        }
    }

    fn scene(&self, width: f32, height: f32) -> PlotScene {
        let pairs = self.pairs();
        if pairs.is_empty() {
            return PlotScene::message(width, height, "No data available");
        }

        let frame = PlotFrame::new(width, height, DEFAULT_MARGINS);
        let area = frame.plot_area();
        let mut scene = PlotScene::new(width, height, area);

        // Extents are guarded by the emptiness check above.
        let (x_min, x_max) = axes::extent(pairs.iter().map(|p| p.x)).unwrap_or_default();
        let (y_min, y_max) = axes::extent(pairs.iter().map(|p| p.y)).unwrap_or_default();
        let x_base = LinearScale::new(axes::padded_domain(x_min, x_max), (area.min[0], area.max[0]));
        let y_base = LinearScale::new(axes::padded_domain(y_min, y_max), (area.max[1], area.min[1]));
        let x = self.viewport.x_scale(&x_base);
        let y = self.viewport.y_scale(&y_base);

        if self.config.show_grid {
            axes::push_horizontal_grid(&mut scene, &y);
            axes::push_vertical_grid(&mut scene, &x);
        }
        axes::push_bottom_axis(&mut scene, &x, ValueFormat::Auto);
        axes::push_left_axis(&mut scene, &y, ValueFormat::Auto);
        axes::push_titles(
            &mut scene,
            &frame,
            &format!("Age of Onset: {} (years)", self.config.x_field.label()),
            &format!("Age of Onset: {} (years)", self.config.y_field.label()),
        );

        self.push_points(&mut scene, &pairs, &x, &y);
        let tuples: Vec<(f64, f64)> = pairs.iter().map(|p| (p.x, p.y)).collect();
        if let Some(fit) = stats::linear_regression(&tuples) {
            self.push_regression(&mut scene, fit, (x_min, x_max), &x, &y);
        }
        self.push_tracked(&mut scene, &x, &y);

        scene
    }

    fn selected_entity(&self) -> Option<SelectedEntity> {
        self.selection.selected().map(|i| SelectedEntity::Point(*i))
    }

    fn reset_interaction(&mut self) {
        self.viewport.reset();
        self.selection.clear();
        self.hovered = None;
    }

    fn save_config(&self) -> Value {
        json!({
            "x_field": self.config.x_field.key(),
            "y_field": self.config.y_field.key(),
            "show_grid": self.config.show_grid,
        })
    }

    fn load_config(&mut self, config: Value) {
        if let Some(field) = config
            .get("x_field")
            .and_then(|v| v.as_str())
            .and_then(Manifestation::from_key)
        {
            self.config.x_field = field;
        }
        if let Some(field) = config
            .get("y_field")
            .and_then(|v| v.as_str())
            .and_then(Manifestation::from_key)
        {
            self.config.y_field = field;
        }
        if let Some(show_grid) = config.get("show_grid").and_then(|v| v.as_bool()) {
            self.config.show_grid = show_grid;
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
