//! Shared band-plot data resolution
//!
//! Box and violin plots both group the filtered distribution samples by
//! manifestation, lay the groups out in fixed display order, and share
//! one y extent across all groups.

use rv_data::{distribution_samples, CohortFilter, Manifestation, PatientRecord};

use crate::plots::utils::stats::{self, GroupStats};

/// Per-category statistics in display order plus the shared y extent.
/// The extent spans the raw values, outliers included, so every mark
/// of every group fits the base domain.
#[derive(Debug, Clone)]
pub struct BandLayout {
    pub groups: Vec<(Manifestation, GroupStats)>,
    pub y_min: f64,
    pub y_max: f64,
}

/// Resolve the band layout for the current records and filter. Returns
/// `None` when no samples survive, categories without samples are
/// simply absent.
pub fn resolve_bands(
    records: &[PatientRecord],
    filter: &CohortFilter,
    only: Option<Manifestation>,
) -> Option<BandLayout> {
    let samples = distribution_samples(records, filter, only);
    let mut by_category = stats::group_statistics(&samples);

    let groups: Vec<(Manifestation, GroupStats)> = Manifestation::ALL
        .iter()
        .filter_map(|m| by_category.remove(m).map(|stats| (*m, stats)))
        .collect();
    if groups.is_empty() {
        return None;
    }

    let y_min = groups
        .iter()
        .map(|(_, s)| s.min)
        .fold(f64::INFINITY, f64::min);
    let y_max = groups
        .iter()
        .map(|(_, s)| s.max)
        .fold(f64::NEG_INFINITY, f64::max);

    Some(BandLayout {
        groups,
        y_min,
        y_max,
    })
}
