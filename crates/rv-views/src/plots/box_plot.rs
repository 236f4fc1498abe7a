//! Box plot of onset distributions per manifestation
//!
//! One box per category in fixed display order: quartile box, median
//! line, mean dot, whiskers to the non-outlier extremes, and outlier
//! dots. Clicking a box selects its category; zoom rescales only the
//! value axis.

use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use rv_core::{BandScale, GestureEvent, HitTarget, LinearScale, SelectionState, ViewportController, ZoomAxes};
use rv_data::{CohortFilter, Manifestation, PatientRecord, TrackedVariant};

use crate::plot_view::{PlotView, PlotViewId, SelectedEntity};
use crate::plots::axes::{self, ValueFormat};
use crate::plots::band::{resolve_bands, BandLayout};
use crate::plots::layout::{PlotFrame, DEFAULT_MARGINS};
use crate::plots::overlay::OverlayProjector;
use crate::plots::utils::colors;
use crate::plots::utils::stats::GroupStats;
use crate::plots::PlotKind;
use crate::scene::{PlotScene, Primitive, Rect, Stroke};

const BAND_PADDING: f32 = 0.3;
/// Box width as a fraction of the bandwidth.
const BOX_WIDTH_RATIO: f32 = 0.7;

/// Configuration for box plot view
#[derive(Debug, Clone, PartialEq)]
pub struct BoxPlotConfig {
    /// Restrict the plot to a single manifestation band
    pub category: Option<Manifestation>,

    /// Whether to show gridlines
    pub show_grid: bool,
}

impl Default for BoxPlotConfig {
    fn default() -> Self {
        Self {
            category: None,
            show_grid: true,
        }
    }
}

/// Box plot view
pub struct BoxPlotView {
    id: PlotViewId,
    title: String,
    pub config: BoxPlotConfig,

    // State
    records: Arc<Vec<PatientRecord>>,
    tracked: Arc<Vec<TrackedVariant>>,
    filter: CohortFilter,
    viewport: ViewportController,
    selection: SelectionState<Manifestation>,
}

impl BoxPlotView {
    pub fn new(id: PlotViewId, title: String) -> Self {
        Self {
            id,
            title,
            config: BoxPlotConfig::default(),
            records: Arc::new(Vec::new()),
            tracked: Arc::new(Vec::new()),
            filter: CohortFilter::default(),
            viewport: ViewportController::new(ZoomAxes::YOnly),
            selection: SelectionState::Unselected,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn push_group(
        &self,
        scene: &mut PlotScene,
        category: Manifestation,
        stats: &GroupStats,
        center: f32,
        box_width: f32,
        y: &LinearScale,
        tracked: &[(usize, &TrackedVariant)],
    ) {
        let selected = self.selection.selected() == Some(&category);
        let half = box_width / 2.0;
        let body_stroke = if selected {
            Stroke::solid(2.0, colors::ACCENT_RED)
        } else {
            Stroke::solid(1.0, colors::INDIGO)
        };

        scene.marks.push(Primitive::Rect {
            rect: Rect::new(
                [center - half, y.map(stats.q3)],
                [center + half, y.map(stats.q1)],
            ),
            fill: Some(colors::INDIGO.with_opacity(if selected { 0.8 } else { 0.6 })),
            stroke: Some(body_stroke),
            hit: Some(HitTarget::Group(category.key().to_owned())),
        });

        let median_y = y.map(stats.median);
        scene.marks.push(Primitive::line(
            [center - half, median_y],
            [center + half, median_y],
            if selected {
                Stroke::solid(3.0, colors::ACCENT_RED)
            } else {
                Stroke::solid(2.0, colors::BLACK)
            },
        ));

        scene.marks.push(Primitive::Circle {
            center: [center, y.map(stats.mean)],
            radius: if selected { 5.0 } else { 4.0 },
            fill: Some(colors::MEAN_ORANGE),
            stroke: Some(Stroke::solid(1.0, colors::WHITE)),
            hit: None,
        });

        // Whiskers run from the box to the non-outlier extremes.
        for (from, to) in [
            (stats.q1, stats.whisker_low),
            (stats.q3, stats.whisker_high),
        ] {
            scene.marks.push(Primitive::line(
                [center, y.map(from)],
                [center, y.map(to)],
                body_stroke,
            ));
        }
        for cap in [stats.whisker_low, stats.whisker_high] {
            let cap_y = y.map(cap);
            scene.marks.push(Primitive::line(
                [center - box_width / 4.0, cap_y],
                [center + box_width / 4.0, cap_y],
                body_stroke,
            ));
        }

        let projector = OverlayProjector::new(scene.plot_area);
        for (index, variant) in tracked {
            if let Some(onset) = variant.onset(category) {
                projector.push_band_marker(
                    scene,
                    center,
                    y.map(onset),
                    half,
                    &variant.display_name(*index),
                );
            }
        }

        for &outlier in &stats.outliers {
            scene.marks.push(Primitive::Circle {
                center: [center, y.map(outlier)],
                radius: if selected { 4.0 } else { 3.0 },
                fill: Some(if selected {
                    colors::ACCENT_RED
                } else {
                    colors::INDIGO
                }),
                stroke: Some(Stroke::solid(1.0, colors::WHITE)),
                hit: None,
            });
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
            y.map(stats.mean),
            half,
            &format!("Mean: {:.2}", stats.mean),
            colors::MEAN_ORANGE,
        ));

        // Count labels sit below the plot area and do not zoom.
        scene.chrome.push(Primitive::label(
            [center, scene.plot_area.max[1] + 20.0],
            format!("n={}", stats.count),
            10.0,
            if selected { colors::ACCENT_RED } else { colors::TEXT_MUTED },
            crate::scene::TextAnchor::Middle,
        ));
    }
}

impl PlotView for BoxPlotView {
    fn id(&self) -> PlotViewId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn kind(&self) -> PlotKind {
        PlotKind::Box
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
                        "box category {} {}",
                        category,
                        if now_selected { "selected" } else { "deselected" }
                    );
                }
            }
            GestureEvent::Click(HitTarget::Point(_)) => {}
            GestureEvent::Hover(_) => {}
            GestureEvent::Reset => self.reset_interaction(),
        }
    }

    fn scene(&self, width: f32, height: f32) -> PlotScene {
        let Some(layout) = resolve_bands(&self.records, &self.filter, self.config.category) else {
            return PlotScene::message(width, height, "No data available");
        };
        let BandLayout { groups, y_min, y_max } = layout;

        let frame = PlotFrame::new(width, height, DEFAULT_MARGINS);
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

        // Box/violin overlays respect the cohort filter.
        let tracked: Vec<(usize, &TrackedVariant)> = self
            .tracked
            .iter()
            .enumerate()
            .filter(|(_, v)| self.filter.matches_tracked(v))
            .collect();

        let box_width = band.bandwidth() * BOX_WIDTH_RATIO;
        for (category, stats) in &groups {
            let Some(center) = band.center(category) else {
                continue;
            };
            self.push_group(&mut scene, *category, stats, center, box_width, &y, &tracked);
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

#[cfg(test)]
mod tests {
    use super::*;
    use rv_core::ZoomTransform;
    use rv_data::Sex;
    use uuid::Uuid;

    fn sample_records() -> Arc<Vec<PatientRecord>> {
        let mut records: Vec<PatientRecord> = (0..8)
            .map(|i| PatientRecord {
                dm: Some(10.0 + i as f64),
                oa: Some(30.0 + i as f64),
                ..Default::default()
            })
            .collect();
        // One extreme value so the dm group has an outlier.
        records.push(PatientRecord {
            dm: Some(90.0),
            ..Default::default()
        });
        Arc::new(records)
    }

    fn view_with_data() -> BoxPlotView {
        let mut view = BoxPlotView::new(Uuid::new_v4(), "Box".to_string());
        view.set_records(sample_records());
        view
    }

    fn boxes(scene: &PlotScene) -> Vec<&Primitive> {
        scene
            .marks
            .iter()
            .filter(|p| matches!(p, Primitive::Rect { hit: Some(_), .. }))
            .collect()
    }

    #[test]
    fn test_one_box_per_present_category() {
        let view = view_with_data();
        let scene = view.scene(800.0, 400.0);
        // Only dm and oa have samples.
        assert_eq!(boxes(&scene).len(), 2);

        let band_labels: Vec<&str> = scene
            .chrome
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .filter(|t| Manifestation::from_label(t).is_some())
            .collect();
        assert_eq!(band_labels, vec!["Diabetes Mellitus", "Optic Atrophy"]);
    }

    #[test]
    fn test_empty_data_renders_placeholder() {
        let view = BoxPlotView::new(Uuid::new_v4(), "Box".to_string());
        let scene = view.scene(800.0, 400.0);
        assert_eq!(scene.placeholder.as_deref(), Some("No data available"));
    }

    #[test]
    fn test_click_toggles_category_selection() {
        let mut view = view_with_data();
        view.handle_gesture(&GestureEvent::Click(HitTarget::Group("dm".to_owned())));
        assert_eq!(
            view.selected_entity(),
            Some(SelectedEntity::Category(Manifestation::DiabetesMellitus))
        );

        view.handle_gesture(&GestureEvent::Click(HitTarget::Group("oa".to_owned())));
        assert_eq!(
            view.selected_entity(),
            Some(SelectedEntity::Category(Manifestation::OpticAtrophy))
        );

        view.handle_gesture(&GestureEvent::Click(HitTarget::Group("oa".to_owned())));
        assert_eq!(view.selected_entity(), None);
    }

    #[test]
    fn test_unknown_category_click_ignored() {
        let mut view = view_with_data();
        view.handle_gesture(&GestureEvent::Click(HitTarget::Group("zz".to_owned())));
        assert_eq!(view.selected_entity(), None);
    }

    #[test]
    fn test_selected_box_emphasized() {
        let mut view = view_with_data();
        view.handle_gesture(&GestureEvent::Click(HitTarget::Group("dm".to_owned())));
        let scene = view.scene(800.0, 400.0);

        let emphasized = scene.marks.iter().any(|p| {
            matches!(
                p,
                Primitive::Rect {
                    hit: Some(HitTarget::Group(key)),
                    stroke: Some(stroke),
                    ..
                } if key == "dm" && stroke.color == colors::ACCENT_RED && stroke.width == 2.0
            )
        });
        assert!(emphasized);
    }

    #[test]
    fn test_zoom_rescales_y_but_not_bands() {
        let mut view = view_with_data();
        let before = view.scene(800.0, 400.0);
        view.handle_gesture(&GestureEvent::Zoom(ZoomTransform::new(2.0, 0.0, -80.0)));
        let after = view.scene(800.0, 400.0);

        let rect_of = |scene: &PlotScene| match boxes(scene)[0] {
            Primitive::Rect { rect, .. } => *rect,
            _ => unreachable!(),
        };
        let (b, a) = (rect_of(&before), rect_of(&after));
        // Band centers hold still, the vertical extent moves.
        assert_eq!(b.min[0], a.min[0]);
        assert_eq!(b.max[0], a.max[0]);
        assert_ne!(b.min[1], a.min[1]);
    }

    #[test]
    fn test_outliers_rendered_beyond_whiskers() {
        let view = view_with_data();
        let scene = view.scene(800.0, 400.0);

        // The dm group contains one outlier at 90.0.
        let outlier_dots = scene
            .marks
            .iter()
            .filter(|p| {
                matches!(
                    p,
                    Primitive::Circle {
                        radius,
                        fill: Some(fill),
                        hit: None,
                        ..
                    } if *radius == 3.0 && *fill == colors::INDIGO
                )
            })
            .count();
        assert_eq!(outlier_dots, 1);
    }

    #[test]
    fn test_count_labels_below_plot_area() {
        let view = view_with_data();
        let scene = view.scene(800.0, 400.0);

        let count_labels: Vec<[f32; 2]> = scene
            .chrome
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { text, pos, .. } if text.starts_with("n=") => Some(*pos),
                _ => None,
            })
            .collect();
        assert_eq!(count_labels.len(), 2);
        for pos in count_labels {
            assert_eq!(pos[1], scene.plot_area.max[1] + 20.0);
        }
    }

    #[test]
    fn test_stat_labels_per_group() {
        let view = view_with_data();
        let scene = view.scene(800.0, 400.0);

        let texts: Vec<&str> = scene
            .marks
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        // dm holds nine samples (10..=17 plus 90), oa holds eight.
        assert!(texts.contains(&"Median: 14.00"));
        assert!(texts.contains(&"Median: 33.50"));
        assert!(texts.iter().any(|t| t.starts_with("Mean: ")));
    }

    #[test]
    fn test_tracked_respects_cohort_filter() {
        let mut view = view_with_data();
        view.set_filter(CohortFilter {
            sex: Some(Sex::Male),
            severity: None,
        });
        view.set_records(Arc::new(vec![
            PatientRecord {
                dm: Some(10.0),
                sex: Some(Sex::Male),
                ..Default::default()
            },
            PatientRecord {
                dm: Some(12.0),
                sex: Some(Sex::Male),
                ..Default::default()
            },
        ]));
        view.set_tracked(Arc::new(vec![
            TrackedVariant {
                name: Some("match".to_string()),
                dm: Some(11.0),
                sex: Some(Sex::Male),
                ..Default::default()
            },
            TrackedVariant {
                name: Some("skip".to_string()),
                dm: Some(11.5),
                sex: Some(Sex::Female),
                ..Default::default()
            },
        ]));

        let scene = view.scene(800.0, 400.0);
        let labels: Vec<&str> = scene
            .marks
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(labels.contains(&"match"));
        assert!(!labels.contains(&"skip"));
    }

    #[test]
    fn test_category_restriction() {
        let mut view = view_with_data();
        view.config.category = Some(Manifestation::OpticAtrophy);
        let scene = view.scene(800.0, 400.0);
        assert_eq!(boxes(&scene).len(), 1);
    }

    #[test]
    fn test_reset_clears_zoom_and_selection() {
        let mut view = view_with_data();
        view.handle_gesture(&GestureEvent::Zoom(ZoomTransform::new(2.0, 0.0, 10.0)));
        view.handle_gesture(&GestureEvent::Click(HitTarget::Group("dm".to_owned())));
        view.handle_gesture(&GestureEvent::Reset);

        assert_eq!(view.selected_entity(), None);
        assert!(view.viewport.is_identity());
    }

    #[test]
    fn test_config_round_trip() {
        let mut view = BoxPlotView::new(Uuid::new_v4(), "Box".to_string());
        view.config.category = Some(Manifestation::HearingLoss);
        view.config.show_grid = false;

        let saved = view.save_config();
        let mut restored = BoxPlotView::new(Uuid::new_v4(), "Box".to_string());
        restored.load_config(saved);
        assert_eq!(restored.config, view.config);
    }
}
