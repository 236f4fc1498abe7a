//! Statistical utilities for plotting

use ahash::AHashMap;
use std::hash::Hash;

/// Calculate quartiles (Q1, median, Q3) from a slice of values
pub fn calculate_quartiles(values: &[f64]) -> (f64, f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0, 0.0);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    quartiles_of_sorted(&sorted)
}

/// Quartiles of an already-sorted slice, by linear interpolation
/// at index `(n - 1) * p`.
fn quartiles_of_sorted(sorted: &[f64]) -> (f64, f64, f64) {
    let n = sorted.len();
    let q1_idx = (n - 1) as f64 * 0.25;
    let median_idx = (n - 1) as f64 * 0.5;
    let q3_idx = (n - 1) as f64 * 0.75;

    let q1 = interpolate(sorted, q1_idx);
    let median = interpolate(sorted, median_idx);
    let q3 = interpolate(sorted, q3_idx);

    (q1, median, q3)
}

/// Linear interpolation between adjacent sorted values
fn interpolate(sorted_values: &[f64], idx: f64) -> f64 {
    let lower = idx.floor() as usize;
    let upper = idx.ceil() as usize;

    if lower == upper {
        sorted_values[lower]
    } else {
        let fraction = idx - lower as f64;
        sorted_values[lower] * (1.0 - fraction) + sorted_values[upper] * fraction
    }
}

/// Distribution statistics for one group of samples.
///
/// Outliers are values strictly outside the IQR fences; the whiskers
/// span the remaining values, falling back to the raw extent when the
/// fences exclude everything.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
    /// Samples sorted ascending.
    pub sorted: Vec<f64>,
}

/// Compute distribution statistics for one group. Returns `None` for
/// an empty slice.
pub fn compute_stats(values: &[f64]) -> Option<GroupStats> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    let min = sorted[0];
    let max = sorted[count - 1];
    let mean = sorted.iter().sum::<f64>() / count as f64;
    let (q1, median, q3) = quartiles_of_sorted(&sorted);
    let iqr = q3 - q1;
    let lower_fence = q1 - 1.5 * iqr;
    let upper_fence = q3 + 1.5 * iqr;

    let outliers: Vec<f64> = sorted
        .iter()
        .copied()
        .filter(|&v| v < lower_fence || v > upper_fence)
        .collect();

    let whisker_low = sorted
        .iter()
        .copied()
        .filter(|&v| v >= lower_fence)
        .fold(f64::INFINITY, f64::min);
    let whisker_high = sorted
        .iter()
        .copied()
        .filter(|&v| v <= upper_fence)
        .fold(f64::NEG_INFINITY, f64::max);

    Some(GroupStats {
        count,
        min,
        max,
        mean,
        q1,
        median,
        q3,
        iqr,
        lower_fence,
        upper_fence,
        whisker_low: if whisker_low.is_finite() { whisker_low } else { min },
        whisker_high: if whisker_high.is_finite() { whisker_high } else { max },
        outliers,
        sorted,
    })
}

/// Per-group statistics for keyed samples. Groups with no samples do
/// not appear in the result.
pub fn group_statistics<K>(samples: &[(K, f64)]) -> AHashMap<K, GroupStats>
where
    K: Hash + Eq + Clone,
{
    let mut grouped: AHashMap<K, Vec<f64>> = AHashMap::new();
    for (key, value) in samples {
        grouped.entry(key.clone()).or_default().push(*value);
    }

    grouped
        .into_iter()
        .filter_map(|(key, values)| compute_stats(&values).map(|stats| (key, stats)))
        .collect()
}

/// One sample of an estimated density curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityPoint {
    pub x: f64,
    pub density: f64,
}

/// Gaussian kernel density estimate over 101 evenly spaced grid points
/// spanning `[min, max]`, with bandwidth fixed at a tenth of the span.
///
/// Degenerate inputs (no samples, or a zero-width span) collapse to a
/// single unit spike at `min`.
pub fn kernel_density(values: &[f64], min: f64, max: f64) -> Vec<DensityPoint> {
    if values.is_empty() || max <= min {
        return vec![DensityPoint {
            x: min,
            density: 1.0,
        }];
    }

    let bandwidth = (max - min) / 10.0;
    let step = (max - min) / 100.0;
    let norm = bandwidth * (2.0 * std::f64::consts::PI).sqrt();
    let n = values.len() as f64;

    (0..=100)
        .map(|i| {
            let x = min + step * i as f64;
            let density = values
                .iter()
                .map(|v| {
                    let u = (x - v) / bandwidth;
                    (-0.5 * u * u).exp() / norm
                })
                .sum::<f64>()
                / n;
            DensityPoint { x, density }
        })
        .collect()
}

/// Ordinary least squares fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
}

/// Least squares regression over paired samples. Returns `None` when
/// fewer than two pairs exist or the x values have no variance, so
/// callers never see NaN or infinite coefficients.
pub fn linear_regression(pairs: &[(f64, f64)]) -> Option<Regression> {
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut ss_xx = 0.0;
    let mut ss_xy = 0.0;
    for (x, y) in pairs {
        ss_xx += (x - mean_x) * (x - mean_x);
        ss_xy += (x - mean_x) * (y - mean_y);
    }

    if ss_xx == 0.0 {
        return None;
    }

    let slope = ss_xy / ss_xx;
    let intercept = mean_y - slope * mean_x;
    if slope.is_finite() && intercept.is_finite() {
        Some(Regression { slope, intercept })
    } else {
        None
    }
}

/// Pearson correlation coefficient over paired samples. Returns `None`
/// when fewer than two pairs exist or either axis has no variance.
pub fn pearson_correlation(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut ss_xx = 0.0;
    let mut ss_yy = 0.0;
    let mut ss_xy = 0.0;
    for (x, y) in pairs {
        ss_xx += (x - mean_x) * (x - mean_x);
        ss_yy += (y - mean_y) * (y - mean_y);
        ss_xy += (x - mean_x) * (y - mean_y);
    }

    if ss_xx == 0.0 || ss_yy == 0.0 {
        return None;
    }

    let r = ss_xy / (ss_xx.sqrt() * ss_yy.sqrt());
    r.is_finite().then_some(r)
}

/// Summary statistics for a single field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
    pub min: f64,
    pub max: f64,
}

/// Summary statistics over a slice of samples, `None` when empty.
pub fn summarize(values: &[f64]) -> Option<Summary> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    let mean = sorted.iter().sum::<f64>() / count as f64;
    let variance = sorted.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / count as f64;
    let (q1, median, q3) = quartiles_of_sorted(&sorted);

    Some(Summary {
        count,
        mean,
        std_dev: variance.sqrt(),
        median,
        q1,
        q3,
        min: sorted[0],
        max: sorted[count - 1],
    })
}
