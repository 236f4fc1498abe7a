//! Violin plot of onset density per manifestation
//!
//! Each category renders a mirrored kernel-density silhouette with
//! reference lines at the quartiles, median, and mean. Hovering a
//! silhouette shows a summary tooltip; clicking selects the category.

use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use rv_core::{BandScale, GestureEvent, HitTarget, LinearScale, SelectionState, ViewportController, ZoomAxes};
use rv_data::{CohortFilter, Manifestation, PatientRecord, TrackedVariant};

use crate::plot_view::{PlotView, PlotViewId, SelectedEntity};
use crate::plots::axes::{self, ValueFormat};
use crate::plots::band::{resolve_bands, BandLayout};
use crate::plots::layout::{PlotFrame, VIOLIN_MARGINS};
use crate::plots::overlay::OverlayProjector;
use crate::plots::utils::colors;
use crate::plots::utils::stats::{kernel_density, GroupStats};
use crate::plots::PlotKind;
use crate::scene::{PlotScene, Primitive, Stroke, Tooltip};

const BAND_PADDING: f32 = 0.2;
/// Fraction of the bandwidth the silhouette occupies at peak density.
const SILHOUETTE_WIDTH_RATIO: f32 = 0.8;
/// Fraction of the bandwidth spanned by tracked variant markers.
const MARKER_EXTENT_RATIO: f32 = 0.4;

/// Configuration for violin plot view
#[derive(Debug, Clone, PartialEq)]
pub struct ViolinPlotConfig {
    /// Restrict the plot to a single manifestation band
    pub category: Option<Manifestation>,

    /// Whether to show gridlines
    pub show_grid: bool,
}

impl Default for ViolinPlotConfig {
    fn default() -> Self {
        Self {
            category: None,
            show_grid: true,
        }
    }
}

/// Violin plot view
pub struct ViolinPlotView {
    id: PlotViewId,
    title: String,
    pub config: ViolinPlotConfig,

    // State
    records: Arc<Vec<PatientRecord>>,
    tracked: Arc<Vec<TrackedVariant>>,
    filter: CohortFilter,
    viewport: ViewportController,
    selection: SelectionState<Manifestation>,
    hovered: Option<Manifestation>,
}

impl ViolinPlotView {
    pub fn new(id: PlotViewId, title: String) -> Self {
        Self {
            id,
            title,
            config: ViolinPlotConfig::default(),
            records: Arc::new(Vec::new()),
            tracked: Arc::new(Vec::new()),
            filter: CohortFilter::default(),
            viewport: ViewportController::new(ZoomAxes::YOnly),
            selection: SelectionState::Unselected,
            hovered: None,
        }
    }

    fn silhouette(
        &self,
        stats: &GroupStats,
        center: f32,
        bandwidth: f32,
        y: &LinearScale,
    ) -> Vec<[f32; 2]> {
        let kde = kernel_density(&stats.sorted, stats.min, stats.max);
        let max_density = kde.iter().map(|p| p.density).fold(0.0, f64::max);
        let scale_factor = if max_density > 0.0 {
            (bandwidth as f64 * SILHOUETTE_WIDTH_RATIO as f64) / (2.0 * max_density)
        } else {
            0.0
        };

        // One pass down the left edge, then back up the right.
        let mut points: Vec<[f32; 2]> = kde
            .iter()
            .map(|p| {
                let offset = (p.density * scale_factor) as f32;
                [center - offset, y.map(p.x)]
            })
            .collect();
        points.extend(kde.iter().rev().map(|p| {
            let offset = (p.density * scale_factor) as f32;
            [center + offset, y.map(p.x)]
        }));
        points
    }

    #[allow(clippy::too_many_arguments)]
    fn push_group(
        &self,
        scene: &mut PlotScene,
        category: Manifestation,
        stats: &GroupStats,
        center: f32,
        bandwidth: f32,
        y: &LinearScale,
        tracked: &[(usize, &TrackedVariant)],
    ) {
        let selected = self.selection.selected() == Some(&category);
        let hovered = self.hovered == Some(category);
        let half = bandwidth / 2.0;

        scene.marks.push(Primitive::Polygon {
            points: self.silhouette(stats, center, bandwidth, y),
            fill: Some(colors::PERIWINKLE.with_opacity(if selected || hovered { 0.8 } else { 0.6 })),
            stroke: selected.then(|| Stroke::solid(2.0, colors::ACCENT_RED)),
            hit: Some(HitTarget::Group(category.key().to_owned())),
        });

        let projector = OverlayProjector::new(scene.plot_area);
        for (index, variant) in tracked {
            if let Some(onset) = variant.onset(category) {
                projector.push_band_marker(
                    scene,
                    center,
                    y.map(onset),
                    bandwidth * MARKER_EXTENT_RATIO,
                    &variant.display_name(*index),
                );
            }
        }

        let line_color = if selected { colors::ACCENT_RED } else { colors::PERIWINKLE };
        let median_y = y.map(stats.median);
        scene.marks.push(Primitive::line(
            [center - half, median_y],
            [center + half, median_y],
            Stroke::solid(2.0, line_color),
        ));
        let mean_y = y.map(stats.mean);
        scene.marks.push(Primitive::line(
            [center - half, mean_y],
            [center + half, mean_y],
            Stroke::solid(2.0, colors::MEAN_ORANGE),
        ));
        for quartile in [stats.q1, stats.q3] {
            let q_y = y.map(quartile);
            scene.marks.push(Primitive::line(
                [center - half, q_y],
                [center + half, q_y],
                Stroke::dashed(1.0, line_color, [3.0, 3.0]),
            ));
        }

        scene.marks.push(projector.label(
            center,
            median_y,
            half,
            &format!("Median: {:.2}", stats.median),
            if selected { colors::ACCENT_RED } else { colors::BLACK },
        ));
        scene.marks.push(projector.label(
            center,
            mean_y,
            half,
            &format!("Mean: {:.2}", stats.mean),
            colors::MEAN_ORANGE,
        ));

        if hovered {
            scene.tooltip = Some(Tooltip {
                pos: [center + half + 10.0, median_y],
                title: category.label().to_owned(),
                lines: vec![
                    format!("Min: {:.2}", stats.min),
                    format!("Q1: {:.2}", stats.q1),
                    format!("Median: {:.2}", stats.median),
                    format!("Mean: {:.2}", stats.mean),
                    format!("Q3: {:.2}", stats.q3),
                    format!("Max: {:.2}", stats.max),
                    format!("n={}", stats.count),
                ],
            });
        }
    }
}

impl PlotView for ViolinPlotView {
    fn id(&self) -> PlotViewId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn kind(&self) -> PlotKind {
        PlotKind::Violin
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
            GestureEvent::Click(HitTarget::Group(key)) => {
                if let Some(category) = Manifestation::from_key(key) {
                    let now_selected = self.selection.toggle(category);
                    debug!(
                        "violin category {} {}",
                        category,
                        if now_selected { "selected" } else { "deselected" }
                    );
                }
            }
            GestureEvent::Click(HitTarget::Point(_)) => {}
            GestureEvent::Hover(Some(HitTarget::Group(key))) => {
                self.hovered = Manifestation::from_key(key);
            }
            GestureEvent::Hover(_) => self.hovered = None,
            GestureEvent::Reset => self.reset_interaction(),
        }
    }

    fn scene(&self, width: f32, height: f32) -> PlotScene {
        let Some(layout) = resolve_bands(&self.records, &self.filter, self.config.category) else {
            return PlotScene::message(width, height, "No data available");
        };
        let BandLayout { groups, y_min, y_max } = layout;

        let frame = PlotFrame::new(width, height, VIOLIN_MARGINS);
        let area = frame.plot_area();
        let mut scene = PlotScene::new(width, height, area);

        let y_base = LinearScale::new(
            axes::padded_domain(y_min, y_max),
            (area.max[1], area.min[1]),
        );
        let y = self.viewport.y_scale(&y_base);
        let band = BandScale::new(
            groups.iter().map(|(m, _)| *m),
            (area.min[0], area.max[0]),
            BAND_PADDING,
        );

        if self.config.show_grid {
            axes::push_horizontal_grid(&mut scene, &y);
        }
        let centers: Vec<(f32, String)> = groups
            .iter()
            .filter_map(|(m, _)| Some((band.center(m)?, m.label().to_owned())))
            .collect();
        axes::push_band_axis(&mut scene, &centers);
        axes::push_left_axis(&mut scene, &y, ValueFormat::Fixed2);
        axes::push_titles(&mut scene, &frame, "Manifestation", "Age of Onset (years)");

        let tracked: Vec<(usize, &TrackedVariant)> = self
            .tracked
            .iter()
            .enumerate()
            .filter(|(_, v)| self.filter.matches_tracked(v))
            .collect();

        for (category, stats) in &groups {
            let Some(center) = band.center(category) else {
                continue;
            };
            self.push_group(
                &mut scene,
                *category,
                stats,
                center,
                band.bandwidth(),
                &y,
                &tracked,
            );
        }

        scene
    }

    fn selected_entity(&self) -> Option<SelectedEntity> {
        self.selection
            .selected()
            .map(|m| SelectedEntity::Category(*m))
    }

    fn reset_interaction(&mut self) {
        self.viewport.reset();
        self.selection.clear();
        self.hovered = None;
    }

    fn save_config(&self) -> Value {
        json!({
            "category": self.config.category.map(|m| m.key()),
            "show_grid": self.config.show_grid,
        })
    }

    fn load_config(&mut self, config: Value) {
        if let Some(category) = config.get("category") {
            self.config.category = category.as_str().and_then(Manifestation::from_key);
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
