//! Shared axis, grid, and title assembly
//!
//! All three plot variants build their frames from the same pieces: a
//! padded value domain, round-valued ticks, faint dashed gridlines, and
//! bold centered titles outside the data region.

use itertools::{Itertools, MinMaxResult};
use rv_core::LinearScale;

use crate::plots::layout::PlotFrame;
use crate::plots::utils::colors;
use crate::scene::{PlotScene, Primitive, Stroke, TextAnchor};

/// Target tick count for value axes.
pub const TICK_COUNT: usize = 5;

const TICK_SIZE: f32 = 6.0;
const TICK_PAD: f32 = 3.0;
const TICK_FONT: f32 = 10.0;
const TITLE_FONT: f32 = 14.0;

/// Data extent padded by a tenth of the span, floored at zero. Onset
/// ages are never negative, so the padding must not push the axis
/// below the origin.
pub fn padded_domain(min: f64, max: f64) -> (f64, f64) {
    let pad = 0.1 * (max - min);
    ((min - pad).max(0.0), max + pad)
}

/// Minimum and maximum of a sample iterator, `None` when empty.
pub fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    match values.minmax() {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(v) => Some((v, v)),
        MinMaxResult::MinMax(lo, hi) => Some((lo, hi)),
    }
}

/// Tick label formatting for a value axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Always two decimal places.
    Fixed2,
    /// Decimal places derived from the tick step.
    Auto,
}

impl ValueFormat {
    fn label(self, value: f64, step: f64) -> String {
        match self {
            Self::Fixed2 => format!("{value:.2}"),
            Self::Auto => {
                let decimals = if step > 0.0 && step < 1.0 {
                    (-step.log10()).ceil() as usize
                } else {
                    0
                };
                format!("{value:.decimals$}")
            }
        }
    }
}

fn tick_step(ticks: &[f64]) -> f64 {
    if ticks.len() > 1 {
        ticks[1] - ticks[0]
    } else {
        0.0
    }
}

/// Value axis along the left edge of the plot area.
pub fn push_left_axis(scene: &mut PlotScene, scale: &LinearScale, format: ValueFormat) {
    let area = scene.plot_area;
    let x = area.min[0];
    scene.chrome.push(Primitive::line(
        [x, area.min[1]],
        [x, area.max[1]],
        Stroke::solid(1.0, colors::BLACK),
    ));

    let ticks = scale.ticks(TICK_COUNT);
    let step = tick_step(&ticks);
    for tick in ticks {
        let y = scale.map(tick);
        scene.chrome.push(Primitive::line(
            [x, y],
            [x - TICK_SIZE, y],
            Stroke::solid(1.0, colors::BLACK),
        ));
        scene.chrome.push(Primitive::label(
            [x - TICK_SIZE - TICK_PAD, y],
            format.label(tick, step),
            TICK_FONT,
            colors::BLACK,
            TextAnchor::End,
        ));
    }
}

/// Value axis along the bottom edge of the plot area.
pub fn push_bottom_axis(scene: &mut PlotScene, scale: &LinearScale, format: ValueFormat) {
    let area = scene.plot_area;
    let y = area.max[1];
    scene.chrome.push(Primitive::line(
        [area.min[0], y],
        [area.max[0], y],
        Stroke::solid(1.0, colors::BLACK),
    ));

    let ticks = scale.ticks(TICK_COUNT);
    let step = tick_step(&ticks);
    for tick in ticks {
        let x = scale.map(tick);
        scene.chrome.push(Primitive::line(
            [x, y],
            [x, y + TICK_SIZE],
            Stroke::solid(1.0, colors::BLACK),
        ));
        scene.chrome.push(Primitive::label(
            [x, y + TICK_SIZE + TICK_PAD + TICK_FONT * 0.5],
            format.label(tick, step),
            TICK_FONT,
            colors::BLACK,
            TextAnchor::Middle,
        ));
    }
}

/// Categorical axis along the bottom edge, one label per band center.
pub fn push_band_axis(scene: &mut PlotScene, centers: &[(f32, String)]) {
    let area = scene.plot_area;
    let y = area.max[1];
    scene.chrome.push(Primitive::line(
        [area.min[0], y],
        [area.max[0], y],
        Stroke::solid(1.0, colors::BLACK),
    ));

    for (x, label) in centers {
        scene.chrome.push(Primitive::line(
            [*x, y],
            [*x, y + TICK_SIZE],
            Stroke::solid(1.0, colors::BLACK),
        ));
        scene.chrome.push(Primitive::label(
            [*x, y + TICK_SIZE + TICK_PAD + TICK_FONT * 0.5],
            label.clone(),
            TICK_FONT,
            colors::BLACK,
            TextAnchor::Middle,
        ));
    }
}

/// Faint horizontal gridlines at each y tick.
pub fn push_horizontal_grid(scene: &mut PlotScene, scale: &LinearScale) {
    let area = scene.plot_area;
    for tick in scale.ticks(TICK_COUNT) {
        let y = scale.map(tick);
        scene.chrome.push(Primitive::line(
            [area.min[0], y],
            [area.max[0], y],
            Stroke::dashed(1.0, colors::GRID, [3.0, 3.0]),
        ));
    }
}

/// Faint vertical gridlines at each x tick.
pub fn push_vertical_grid(scene: &mut PlotScene, scale: &LinearScale) {
    let area = scene.plot_area;
    for tick in scale.ticks(TICK_COUNT) {
        let x = scale.map(tick);
        scene.chrome.push(Primitive::line(
            [x, area.min[1]],
            [x, area.max[1]],
            Stroke::dashed(1.0, colors::GRID, [3.0, 3.0]),
        ));
    }
}

/// Bold axis titles below and to the left of the plot area.
pub fn push_titles(scene: &mut PlotScene, frame: &PlotFrame, x_title: &str, y_title: &str) {
    let area = frame.plot_area();
    scene.chrome.push(Primitive::Text {
        pos: [area.center()[0], area.max[1] + frame.margins.bottom - 10.0],
        text: x_title.to_owned(),
        size: TITLE_FONT,
        color: colors::BLACK,
        anchor: TextAnchor::Middle,
        bold: true,
        rotation_degrees: 0.0,
    });
    scene.chrome.push(Primitive::Text {
        pos: [20.0, area.center()[1]],
        text: y_title.to_owned(),
        size: TITLE_FONT,
        color: colors::BLACK,
        anchor: TextAnchor::Middle,
        bold: true,
        rotation_degrees: -90.0,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plots::layout::DEFAULT_MARGINS;
    use crate::scene::Rect;

    fn empty_scene() -> PlotScene {
        PlotScene::new(800.0, 400.0, Rect::new([80.0, 50.0], [680.0, 330.0]))
    }

    #[test]
    fn test_padded_domain() {
        let (lo, hi) = padded_domain(10.0, 30.0);
        assert!((lo - 8.0).abs() < 1e-10);
        assert!((hi - 32.0).abs() < 1e-10);
    }

    #[test]
    fn test_padded_domain_floors_at_zero() {
        let (lo, hi) = padded_domain(0.0, 10.0);
        assert_eq!(lo, 0.0);
        assert!((hi - 11.0).abs() < 1e-10);
    }

    #[test]
    fn test_extent() {
        assert_eq!(extent([3.0, 1.0, 2.0].into_iter()), Some((1.0, 3.0)));
        assert_eq!(extent(std::iter::once(4.0)), Some((4.0, 4.0)));
        assert_eq!(extent(std::iter::empty()), None);
    }

    #[test]
    fn test_value_format() {
        assert_eq!(ValueFormat::Fixed2.label(40.0, 20.0), "40.00");
        assert_eq!(ValueFormat::Auto.label(40.0, 20.0), "40");
        assert_eq!(ValueFormat::Auto.label(0.4, 0.2), "0.4");
        assert_eq!(ValueFormat::Auto.label(0.05, 0.05), "0.05");
    }

    #[test]
    fn test_left_axis_labels() {
        let mut scene = empty_scene();
        let scale = LinearScale::new((0.0, 100.0), (330.0, 50.0));
        push_left_axis(&mut scene, &scale, ValueFormat::Fixed2);

        let labels: Vec<&str> = scene
            .chrome
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            labels,
            vec!["0.00", "20.00", "40.00", "60.00", "80.00", "100.00"]
        );
    }

    #[test]
    fn test_grid_spans_plot_area() {
        let mut scene = empty_scene();
        let scale = LinearScale::new((0.0, 100.0), (330.0, 50.0));
        push_horizontal_grid(&mut scene, &scale);

        assert_eq!(scene.chrome.len(), 6);
        for primitive in &scene.chrome {
            match primitive {
                Primitive::Line { from, to, stroke } => {
                    assert_eq!(from[0], 80.0);
                    assert_eq!(to[0], 680.0);
                    assert_eq!(stroke.dash, Some([3.0, 3.0]));
                }
                other => panic!("unexpected primitive {other:?}"),
            }
        }
    }

    #[test]
    fn test_titles_placed_outside_plot_area() {
        let frame = PlotFrame::new(800.0, 400.0, DEFAULT_MARGINS);
        let mut scene = PlotScene::new(800.0, 400.0, frame.plot_area());
        push_titles(&mut scene, &frame, "Manifestation", "Age of Onset (years)");

        match &scene.chrome[0] {
            Primitive::Text { pos, bold, .. } => {
                assert_eq!(*pos, [380.0, 390.0]);
                assert!(*bold);
            }
            other => panic!("unexpected primitive {other:?}"),
        }
        match &scene.chrome[1] {
            Primitive::Text {
                pos,
                rotation_degrees,
                ..
            } => {
                assert_eq!(*pos, [20.0, 190.0]);
                assert_eq!(*rotation_degrees, -90.0);
            }
            other => panic!("unexpected primitive {other:?}"),
        }
    }
}
