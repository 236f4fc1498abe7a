//! Zoom/pan viewport state
//!
//! Gestures deliver an absolute `ZoomTransform` per event (standard
//! zoom-transform semantics: each update replaces the stored transform,
//! nothing is composed incrementally, so a stream of events cannot
//! accumulate drift). Base scales stay immutable; the effective scale is
//! derived on demand by mapping the base range through the inverse
//! transform.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scale::LinearScale;

/// Allowed zoom scale factor range.
pub const SCALE_EXTENT: (f64, f64) = (0.5, 5.0);

/// Absolute zoom/pan transform: `pixel = value_pixel * k + t`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    /// Scale factor.
    pub k: f64,
    /// X translation in pixels.
    pub x: f64,
    /// Y translation in pixels.
    pub y: f64,
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    pub fn new(k: f64, x: f64, y: f64) -> Self {
        Self { k, x, y }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Clamp the scale factor to [`SCALE_EXTENT`].
    pub fn clamped(self) -> Self {
        Self {
            k: self.k.clamp(SCALE_EXTENT.0, SCALE_EXTENT.1),
            ..self
        }
    }

    /// Derive the effective x scale from an immutable base scale.
    ///
    /// The base range endpoints are pulled through the inverse transform
    /// (`(r - x) / k`) and inverted back into domain space, yielding a
    /// scale with the same range and a shifted/stretched domain.
    pub fn rescale_x(&self, base: &LinearScale) -> LinearScale {
        let (r0, r1) = base.range();
        let d0 = base.invert(((r0 as f64 - self.x) / self.k) as f32);
        let d1 = base.invert(((r1 as f64 - self.x) / self.k) as f32);
        base.with_domain((d0, d1))
    }

    /// Derive the effective y scale from an immutable base scale.
    pub fn rescale_y(&self, base: &LinearScale) -> LinearScale {
        let (r0, r1) = base.range();
        let d0 = base.invert(((r0 as f64 - self.y) / self.k) as f32);
        let d1 = base.invert(((r1 as f64 - self.y) / self.k) as f32);
        base.with_domain((d0, d1))
    }
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Which axes a plot variant lets the viewport rescale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomAxes {
    /// Scatter: x and y rescale independently.
    Both,
    /// Box/violin: only the numeric y axis rescales, the categorical
    /// band axis is never touched by zoom.
    YOnly,
}

/// Owns the current transform for one plot view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportController {
    transform: ZoomTransform,
    axes: ZoomAxes,
}

impl ViewportController {
    pub fn new(axes: ZoomAxes) -> Self {
        Self {
            transform: ZoomTransform::IDENTITY,
            axes,
        }
    }

    pub fn axes(&self) -> ZoomAxes {
        self.axes
    }

    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    pub fn is_identity(&self) -> bool {
        self.transform.is_identity()
    }

    /// Replace the stored transform with a new absolute one.
    pub fn apply(&mut self, transform: ZoomTransform) {
        let clamped = transform.clamped();
        if clamped.k != transform.k {
            debug!(
                "zoom factor {} outside {:?}, clamped to {}",
                transform.k, SCALE_EXTENT, clamped.k
            );
        }
        self.transform = clamped;
    }

    /// Restore the identity transform.
    pub fn reset(&mut self) {
        self.transform = ZoomTransform::IDENTITY;
    }

    /// Effective x scale for the current transform.
    pub fn x_scale(&self, base: &LinearScale) -> LinearScale {
        match self.axes {
            ZoomAxes::Both => self.transform.rescale_x(base),
            ZoomAxes::YOnly => *base,
        }
    }

    /// Effective y scale for the current transform.
    pub fn y_scale(&self, base: &LinearScale) -> LinearScale {
        self.transform.rescale_y(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_rescale_is_noop() {
        let base = LinearScale::new((0.0, 100.0), (0.0, 500.0));
        let rescaled = ZoomTransform::IDENTITY.rescale_x(&base);
        assert_eq!(rescaled.domain(), base.domain());
    }

    #[test]
    fn test_zoom_in_narrows_domain() {
        let base = LinearScale::new((0.0, 100.0), (0.0, 500.0));
        let t = ZoomTransform::new(2.0, 0.0, 0.0);
        let rescaled = t.rescale_x(&base);
        let (d0, d1) = rescaled.domain();
        assert!((d0 - 0.0).abs() < 1e-6);
        assert!((d1 - 50.0).abs() < 1e-6);
        // Points under the new domain project to where the transform
        // would have moved them: value 50 sits at the old range end.
        assert!((rescaled.map(50.0) - 500.0).abs() < 1e-3);
    }

    #[test]
    fn test_pan_shifts_domain() {
        let base = LinearScale::new((0.0, 100.0), (0.0, 500.0));
        let t = ZoomTransform::new(1.0, -250.0, 0.0);
        let (d0, d1) = t.rescale_x(&base).domain();
        assert!((d0 - 50.0).abs() < 1e-6);
        assert!((d1 - 150.0).abs() < 1e-6);
    }

    #[test]
    fn test_rescale_y_uses_y_translation() {
        let base = LinearScale::new((0.0, 100.0), (280.0, 0.0));
        let t = ZoomTransform::new(1.0, 9999.0, 0.0);
        // X translation must not leak into the y rescale.
        assert_eq!(t.rescale_y(&base).domain(), base.domain());
    }

    #[test]
    fn test_apply_replaces_not_composes() {
        let mut vp = ViewportController::new(ZoomAxes::Both);
        vp.apply(ZoomTransform::new(2.0, 10.0, 0.0));
        vp.apply(ZoomTransform::new(3.0, -5.0, 7.0));
        assert_eq!(vp.transform(), ZoomTransform::new(3.0, -5.0, 7.0));
    }

    #[test]
    fn test_apply_clamps_scale_factor() {
        let mut vp = ViewportController::new(ZoomAxes::Both);
        vp.apply(ZoomTransform::new(12.0, 0.0, 0.0));
        assert_eq!(vp.transform().k, SCALE_EXTENT.1);
        vp.apply(ZoomTransform::new(0.01, 0.0, 0.0));
        assert_eq!(vp.transform().k, SCALE_EXTENT.0);
    }

    #[test]
    fn test_y_only_holds_band_axis_fixed() {
        let base = LinearScale::new((0.0, 100.0), (0.0, 500.0));
        let mut vp = ViewportController::new(ZoomAxes::YOnly);
        vp.apply(ZoomTransform::new(2.0, 30.0, 40.0));
        assert_eq!(vp.x_scale(&base).domain(), base.domain());
        assert_ne!(vp.y_scale(&base).domain(), base.domain());
    }

    #[test]
    fn test_reset_restores_identity() {
        let mut vp = ViewportController::new(ZoomAxes::YOnly);
        vp.apply(ZoomTransform::new(2.5, 1.0, 2.0));
        vp.reset();
        assert!(vp.is_identity());
    }
}
