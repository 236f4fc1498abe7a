//! Mark annotations and tracked-variant markers
//!
//! Annotations sit to the right of their mark by default. When the
//! estimated text width would run past the plot area they flip to the
//! left side with an end anchor, so labels near the right edge stay
//! readable instead of being clipped.

use crate::plots::utils::colors::{self, Color};
use crate::scene::{PlotScene, Primitive, Rect, Stroke, TextAnchor};

const CHAR_WIDTH: f32 = 6.0;
const ANNOTATION_FONT: f32 = 10.0;

/// Approximate rendered width of an annotation at the 10px font.
pub fn estimate_label_width(text: &str) -> f32 {
    text.chars().count() as f32 * CHAR_WIDTH
}

/// Places annotations beside marks, flipping them left when they would
/// overflow the plot area.
#[derive(Debug, Clone, Copy)]
pub struct OverlayProjector {
    area: Rect,
    label_offset: f32,
}

impl OverlayProjector {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            label_offset: 5.0,
        }
    }

    /// Gap between the mark edge and the label.
    pub fn with_label_offset(mut self, offset: f32) -> Self {
        self.label_offset = offset;
        self
    }

    /// Label beside a mark centered at `center_x` reaching
    /// `half_extent` to each side.
    pub fn label(
        &self,
        center_x: f32,
        y: f32,
        half_extent: f32,
        text: &str,
        color: Color,
    ) -> Primitive {
        let start = center_x + half_extent + self.label_offset;
        if start + estimate_label_width(text) > self.area.max[0] {
            Primitive::label(
                [center_x - half_extent - self.label_offset, y],
                text,
                ANNOTATION_FONT,
                color,
                TextAnchor::End,
            )
        } else {
            Primitive::label([start, y], text, ANNOTATION_FONT, color, TextAnchor::Start)
        }
    }

    /// Dashed marker line across a band with the variant's name beside it.
    pub fn push_band_marker(
        &self,
        scene: &mut PlotScene,
        center_x: f32,
        y: f32,
        half_extent: f32,
        name: &str,
    ) {
        scene.marks.push(Primitive::line(
            [center_x - half_extent, y],
            [center_x + half_extent, y],
            Stroke::dashed(3.0, colors::ACCENT_RED, [5.0, 3.0]),
        ));
        scene
            .marks
            .push(self.label(center_x, y, half_extent, name, colors::ACCENT_RED));
    }

    /// Ring around a tracked point with the variant's name beside it.
    pub fn push_point_marker(&self, scene: &mut PlotScene, pos: [f32; 2], name: &str) {
        scene.marks.push(Primitive::Circle {
            center: pos,
            radius: 5.0,
            fill: None,
            stroke: Some(Stroke::solid(2.0, colors::ACCENT_RED)),
            hit: None,
        });
        scene
            .marks
            .push(self.label(pos[0], pos[1], 0.0, name, colors::ACCENT_RED));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rect {
        Rect::new([80.0, 50.0], [680.0, 330.0])
    }

    #[test]
    fn test_estimate_label_width() {
        assert_eq!(estimate_label_width("Median: 12.34"), 78.0);
        assert_eq!(estimate_label_width(""), 0.0);
    }

    #[test]
    fn test_label_sits_right_of_mark() {
        let projector = OverlayProjector::new(area());
        match projector.label(200.0, 100.0, 30.0, "Mean: 5.00", colors::MEAN_ORANGE) {
            Primitive::Text { pos, anchor, .. } => {
                assert_eq!(pos, [235.0, 100.0]);
                assert_eq!(anchor, TextAnchor::Start);
            }
            other => panic!("unexpected primitive {other:?}"),
        }
    }

    #[test]
    fn test_label_flips_near_right_edge() {
        let projector = OverlayProjector::new(area());
        // 650 + 30 + 5 + 60 would cross the right edge at 680.
        match projector.label(650.0, 100.0, 30.0, "Mean: 5.00", colors::MEAN_ORANGE) {
            Primitive::Text { pos, anchor, .. } => {
                assert_eq!(pos, [615.0, 100.0]);
                assert_eq!(anchor, TextAnchor::End);
            }
            other => panic!("unexpected primitive {other:?}"),
        }
    }

    #[test]
    fn test_point_marker_offset() {
        let mut scene = PlotScene::new(800.0, 400.0, area());
        let projector = OverlayProjector::new(area()).with_label_offset(10.0);
        projector.push_point_marker(&mut scene, [200.0, 150.0], "p.V412fs");

        assert_eq!(scene.marks.len(), 2);
        match &scene.marks[0] {
            Primitive::Circle { radius, fill, .. } => {
                assert_eq!(*radius, 5.0);
                assert!(fill.is_none());
            }
            other => panic!("unexpected primitive {other:?}"),
        }
        match &scene.marks[1] {
            Primitive::Text { pos, .. } => assert_eq!(*pos, [210.0, 150.0]),
            other => panic!("unexpected primitive {other:?}"),
        }
    }

    #[test]
    fn test_band_marker_dash() {
        let mut scene = PlotScene::new(800.0, 400.0, area());
        OverlayProjector::new(area()).push_band_marker(&mut scene, 300.0, 120.0, 40.0, "Variant (1)");

        match &scene.marks[0] {
            Primitive::Line { from, to, stroke } => {
                assert_eq!(*from, [260.0, 120.0]);
                assert_eq!(*to, [340.0, 120.0]);
                assert_eq!(stroke.dash, Some([5.0, 3.0]));
                assert_eq!(stroke.width, 3.0);
            }
            other => panic!("unexpected primitive {other:?}"),
        }
    }
}
