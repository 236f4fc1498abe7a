//! Domain-to-pixel scale functions
//!
//! Linear scales map a numeric domain onto a pixel range (which may be
//! inverted for screen-space y axes). Band scales position categorical
//! groups with proportional padding. Both are plain values; zooming
//! derives new scales rather than mutating these.

use std::hash::Hash;

use indexmap::IndexMap;

/// Continuous linear mapping from a numeric domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    /// Map a domain value to its pixel position.
    pub fn map(&self, value: f64) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        let t = (value - d0) / (d1 - d0);
        (r0 as f64 + t * (r1 - r0) as f64) as f32
    }

    /// Map a pixel position back to its domain value.
    pub fn invert(&self, pixel: f32) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        let t = (pixel - r0) as f64 / (r1 - r0) as f64;
        d0 + t * (d1 - d0)
    }

    /// Same range, different domain.
    pub fn with_domain(&self, domain: (f64, f64)) -> Self {
        Self {
            domain,
            range: self.range,
        }
    }

    /// Round-valued tick positions within the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }
}

/// Categorical band scale with proportional inner/outer padding.
///
/// Uses the standard band arithmetic: `step = extent / (n + padding)`,
/// `bandwidth = step * (1 - padding)`, with the leftover extent split
/// evenly on both sides.
#[derive(Debug, Clone)]
pub struct BandScale<K: Hash + Eq + Clone> {
    index: IndexMap<K, usize>,
    range: (f32, f32),
    padding: f32,
}

impl<K: Hash + Eq + Clone> BandScale<K> {
    pub fn new(categories: impl IntoIterator<Item = K>, range: (f32, f32), padding: f32) -> Self {
        let index = categories
            .into_iter()
            .enumerate()
            .map(|(i, k)| (k, i))
            .collect();
        Self {
            index,
            range,
            padding,
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.index.keys()
    }

    pub fn step(&self) -> f32 {
        let n = self.index.len() as f32;
        let extent = self.range.1 - self.range.0;
        let divisor = (n + self.padding).max(1.0);
        extent / divisor
    }

    pub fn bandwidth(&self) -> f32 {
        self.step() * (1.0 - self.padding)
    }

    /// Left edge of a category's band.
    pub fn position(&self, key: &K) -> Option<f32> {
        let i = *self.index.get(key)?;
        let n = self.index.len() as f32;
        let extent = self.range.1 - self.range.0;
        let step = self.step();
        let start = self.range.0 + (extent - step * (n - self.padding)) * 0.5;
        Some(start + step * i as f32)
    }

    /// Center of a category's band.
    pub fn center(&self, key: &K) -> Option<f32> {
        Some(self.position(key)? + self.bandwidth() * 0.5)
    }
}

/// Round-valued tick positions covering `[start, stop]`, aiming for
/// roughly `count` ticks on a 1/2/5 step progression.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let inc = tick_increment(start, stop, count);
    if !inc.is_finite() || inc == 0.0 {
        return vec![start];
    }
    // Positive increments are plain steps; negative ones encode the
    // reciprocal of a sub-unit step, which keeps fractional tick values
    // exact (i / 5 instead of i * 0.2).
    if inc > 0.0 {
        let first = (start / inc).ceil();
        let last = (stop / inc).floor();
        if last < first {
            return Vec::new();
        }
        let n = (last - first) as usize;
        (0..=n).map(|i| (first + i as f64) * inc).collect()
    } else {
        let inc = -inc;
        let first = (start * inc).ceil();
        let last = (stop * inc).floor();
        if last < first {
            return Vec::new();
        }
        let n = (last - first) as usize;
        (0..=n).map(|i| (first + i as f64) / inc).collect()
    }
}

fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start) / count.max(1) as f64;
    let power = raw.log10().floor() as i32;
    let error = raw / 10f64.powi(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    if power >= 0 {
        factor * 10f64.powi(power)
    } else {
        -(10f64.powi(-power)) / factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_map_and_invert() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 500.0));
        assert_eq!(scale.map(0.0), 0.0);
        assert_eq!(scale.map(50.0), 250.0);
        assert_eq!(scale.map(100.0), 500.0);
        assert!((scale.invert(250.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_inverted_range() {
        // Screen-space y: larger values map to smaller pixel positions.
        let scale = LinearScale::new((0.0, 10.0), (280.0, 0.0));
        assert_eq!(scale.map(0.0), 280.0);
        assert_eq!(scale.map(10.0), 0.0);
        assert!((scale.invert(140.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_degenerate_domain() {
        let scale = LinearScale::new((4.0, 4.0), (0.0, 100.0));
        assert_eq!(scale.map(4.0), 0.0);
        assert_eq!(scale.map(9.0), 0.0);
    }

    #[test]
    fn test_linear_extrapolates_outside_domain() {
        let scale = LinearScale::new((0.0, 10.0), (0.0, 100.0));
        assert_eq!(scale.map(-5.0), -50.0);
        assert_eq!(scale.map(15.0), 150.0);
    }

    #[test]
    fn test_band_positions() {
        let scale = BandScale::new(["a", "b", "c", "d"], (0.0, 600.0), 0.3);
        let step = 600.0 / 4.3;
        assert!((scale.step() - step).abs() < 1e-3);
        assert!((scale.bandwidth() - step * 0.7).abs() < 1e-3);

        let start = (600.0 - step * 3.7) * 0.5;
        assert!((scale.position(&"a").unwrap() - start).abs() < 1e-3);
        assert!((scale.position(&"c").unwrap() - (start + step * 2.0)).abs() < 1e-3);
        assert_eq!(scale.position(&"z"), None);
    }

    #[test]
    fn test_band_spans_range() {
        let scale = BandScale::new([1, 2, 3], (0.0, 300.0), 0.2);
        let last_right = scale.position(&3).unwrap() + scale.bandwidth();
        let outer = scale.position(&1).unwrap();
        // Outer padding on the right should mirror the left.
        assert!((300.0 - last_right - outer).abs() < 1e-3);
    }

    #[test]
    fn test_band_center() {
        let scale = BandScale::new(["only"], (0.0, 100.0), 0.0);
        assert!((scale.center(&"only").unwrap() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_ticks_round_steps() {
        assert_eq!(ticks(0.0, 100.0, 5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(ticks(3.7, 92.4, 5), vec![20.0, 40.0, 60.0, 80.0]);
    }

    #[test]
    fn test_ticks_fractional_domain() {
        // Sub-unit steps must land exactly on the domain endpoints.
        assert_eq!(ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn test_ticks_degenerate() {
        assert_eq!(ticks(5.0, 5.0, 5), vec![5.0]);
        assert!(ticks(0.0, 1.0, 0).is_empty());
        assert!(ticks(f64::NAN, 1.0, 5).is_empty());
    }
}
