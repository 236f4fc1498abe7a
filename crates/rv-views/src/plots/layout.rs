//! Plot frame layout

use serde::{Deserialize, Serialize};

use crate::scene::Rect;

/// Margins around the data region, in output pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Margins for the scatter and box variants.
pub const DEFAULT_MARGINS: Margins = Margins::new(50.0, 120.0, 70.0, 80.0);

/// The violin variant reserves extra room on the right for its stat labels.
pub const VIOLIN_MARGINS: Margins = Margins::new(50.0, 150.0, 70.0, 80.0);

/// Outer plot size plus margins, resolved to a data region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotFrame {
    pub width: f32,
    pub height: f32,
    pub margins: Margins,
}

impl PlotFrame {
    pub fn new(width: f32, height: f32, margins: Margins) -> Self {
        Self {
            width,
            height,
            margins,
        }
    }

    /// Data region inside the margins. Collapses to an empty rect when
    /// the margins exceed the outer size.
    pub fn plot_area(&self) -> Rect {
        let left = self.margins.left;
        let top = self.margins.top;
        let right = (self.width - self.margins.right).max(left);
        let bottom = (self.height - self.margins.bottom).max(top);
        Rect::new([left, top], [right, bottom])
    }

    pub fn plot_width(&self) -> f32 {
        self.plot_area().width()
    }

    pub fn plot_height(&self) -> f32 {
        self.plot_area().height()
    }
}
