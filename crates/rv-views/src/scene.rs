//! Device-independent scene description emitted by plot views
//!
//! A [`PlotScene`] is a flat list of drawing primitives in output
//! coordinates, ready for any renderer that can stroke lines, fill
//! shapes, and place text. Primitives that respond to clicks carry a
//! [`HitTarget`] so the embedder can translate pointer positions back
//! into gesture events.

use rv_core::HitTarget;
use serde::{Deserialize, Serialize};

use crate::plots::utils::colors::Color;

/// Axis-aligned rectangle in output coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl Rect {
    pub fn new(min: [f32; 2], max: [f32; 2]) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f32 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f32 {
        self.max[1] - self.min[1]
    }

    pub fn center(&self) -> [f32; 2] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
        ]
    }

    pub fn contains(&self, pos: [f32; 2]) -> bool {
        pos[0] >= self.min[0] && pos[0] <= self.max[0] && pos[1] >= self.min[1] && pos[1] <= self.max[1]
    }
}

/// Stroke style for lines and shape outlines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
    /// Dash pattern as `[on, off]` lengths; `None` draws solid.
    pub dash: Option<[f32; 2]>,
}

impl Stroke {
    pub fn solid(width: f32, color: Color) -> Self {
        Self {
            width,
            color,
            dash: None,
        }
    }

    pub fn dashed(width: f32, color: Color, dash: [f32; 2]) -> Self {
        Self {
            width,
            color,
            dash: Some(dash),
        }
    }
}

/// Horizontal anchoring of a text run relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// One drawing command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Line {
        from: [f32; 2],
        to: [f32; 2],
        stroke: Stroke,
    },
    Rect {
        rect: Rect,
        fill: Option<Color>,
        stroke: Option<Stroke>,
        hit: Option<HitTarget>,
    },
    Circle {
        center: [f32; 2],
        radius: f32,
        fill: Option<Color>,
        stroke: Option<Stroke>,
        hit: Option<HitTarget>,
    },
    Polygon {
        points: Vec<[f32; 2]>,
        fill: Option<Color>,
        stroke: Option<Stroke>,
        hit: Option<HitTarget>,
    },
    Text {
        pos: [f32; 2],
        text: String,
        size: f32,
        color: Color,
        anchor: TextAnchor,
        bold: bool,
        /// Rotation in degrees, SVG convention (negative turns counter-clockwise).
        rotation_degrees: f32,
    },
}

impl Primitive {
    pub fn line(from: [f32; 2], to: [f32; 2], stroke: Stroke) -> Self {
        Self::Line { from, to, stroke }
    }

    /// Plain horizontal label with no rotation.
    pub fn label(
        pos: [f32; 2],
        text: impl Into<String>,
        size: f32,
        color: Color,
        anchor: TextAnchor,
    ) -> Self {
        Self::Text {
            pos,
            text: text.into(),
            size,
            color,
            anchor,
            bold: false,
            rotation_degrees: 0.0,
        }
    }
}

/// Hover tooltip content, anchored next to the hovered mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub pos: [f32; 2],
    pub title: String,
    pub lines: Vec<String>,
}

/// Complete description of one rendered plot.
///
/// Marks are the data layer and must be clipped to `plot_area` by the
/// renderer, since zooming can push them past the axes. Chrome (axes,
/// gridlines, titles, static annotations) is never clipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotScene {
    pub width: f32,
    pub height: f32,
    /// Data region inside the margins, also the clip region for marks.
    pub plot_area: Rect,
    pub chrome: Vec<Primitive>,
    pub marks: Vec<Primitive>,
    pub tooltip: Option<Tooltip>,
    /// Centered message shown instead of marks, e.g. while loading.
    pub placeholder: Option<String>,
}

impl PlotScene {
    pub fn new(width: f32, height: f32, plot_area: Rect) -> Self {
        Self {
            width,
            height,
            plot_area,
            chrome: Vec::new(),
            marks: Vec::new(),
            tooltip: None,
            placeholder: None,
        }
    }

    /// Scene carrying only a centered message, for empty or failed states.
    pub fn message(width: f32, height: f32, text: impl Into<String>) -> Self {
        Self {
            width,
            height,
            plot_area: Rect::new([0.0, 0.0], [width, height]),
            chrome: Vec::new(),
            marks: Vec::new(),
            tooltip: None,
            placeholder: Some(text.into()),
        }
    }

    /// Topmost clickable mark under `pos`, if any. Chrome never
    /// responds to clicks.
    pub fn hit_test(&self, pos: [f32; 2]) -> Option<&HitTarget> {
        self.marks.iter().rev().find_map(|primitive| match primitive {
            Primitive::Rect {
                rect,
                hit: Some(hit),
                ..
            } if rect.contains(pos) => Some(hit),
            Primitive::Circle {
                center,
                radius,
                hit: Some(hit),
                ..
            } if dist_sq(*center, pos) <= radius * radius => Some(hit),
            Primitive::Polygon {
                points,
                hit: Some(hit),
                ..
            } if polygon_contains(points, pos) => Some(hit),
            _ => None,
        })
    }
}

fn dist_sq(a: [f32; 2], b: [f32; 2]) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}

/// Even-odd ray cast point-in-polygon test.
fn polygon_contains(points: &[[f32; 2]], pos: [f32; 2]) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let [xi, yi] = points[i];
        let [xj, yj] = points[j];
        if (yi > pos[1]) != (yj > pos[1]) && pos[0] < (xj - xi) * (pos[1] - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plots::utils::colors;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new([10.0, 10.0], [20.0, 30.0]);
        assert!(rect.contains([15.0, 20.0]));
        assert!(rect.contains([10.0, 10.0]));
        assert!(!rect.contains([9.9, 20.0]));
        assert!(!rect.contains([15.0, 30.1]));
    }

    #[test]
    fn test_hit_test_topmost_wins() {
        let mut scene = PlotScene::new(100.0, 100.0, Rect::new([0.0, 0.0], [100.0, 100.0]));
        scene.marks.push(Primitive::Rect {
            rect: Rect::new([0.0, 0.0], [50.0, 50.0]),
            fill: Some(colors::INDIGO),
            stroke: None,
            hit: Some(HitTarget::Group("below".to_owned())),
        });
        scene.marks.push(Primitive::Circle {
            center: [25.0, 25.0],
            radius: 5.0,
            fill: Some(colors::ACCENT_RED),
            stroke: None,
            hit: Some(HitTarget::Point(3)),
        });

        assert_eq!(scene.hit_test([25.0, 25.0]), Some(&HitTarget::Point(3)));
        assert_eq!(
            scene.hit_test([45.0, 45.0]),
            Some(&HitTarget::Group("below".to_owned()))
        );
        assert_eq!(scene.hit_test([80.0, 80.0]), None);
    }

    #[test]
    fn test_hit_test_circle_radius() {
        let mut scene = PlotScene::new(100.0, 100.0, Rect::new([0.0, 0.0], [100.0, 100.0]));
        scene.marks.push(Primitive::Circle {
            center: [50.0, 50.0],
            radius: 5.0,
            fill: None,
            stroke: Some(Stroke::solid(1.0, colors::BLACK)),
            hit: Some(HitTarget::Point(0)),
        });

        assert!(scene.hit_test([54.0, 50.0]).is_some());
        assert!(scene.hit_test([56.0, 50.0]).is_none());
    }

    #[test]
    fn test_chrome_is_not_clickable() {
        let mut scene = PlotScene::new(100.0, 100.0, Rect::new([0.0, 0.0], [100.0, 100.0]));
        scene.chrome.push(Primitive::Rect {
            rect: Rect::new([0.0, 0.0], [100.0, 100.0]),
            fill: Some(colors::WHITE),
            stroke: None,
            hit: Some(HitTarget::Point(9)),
        });
        assert_eq!(scene.hit_test([50.0, 50.0]), None);
    }

    #[test]
    fn test_polygon_containment() {
        let diamond = vec![[50.0, 0.0], [100.0, 50.0], [50.0, 100.0], [0.0, 50.0]];
        assert!(polygon_contains(&diamond, [50.0, 50.0]));
        assert!(!polygon_contains(&diamond, [5.0, 5.0]));
        assert!(!polygon_contains(&[[0.0, 0.0], [1.0, 1.0]], [0.5, 0.5]));
    }

    #[test]
    fn test_message_scene() {
        let scene = PlotScene::message(300.0, 200.0, "No data available");
        assert!(scene.chrome.is_empty());
        assert!(scene.marks.is_empty());
        assert_eq!(scene.placeholder.as_deref(), Some("No data available"));
    }
}
