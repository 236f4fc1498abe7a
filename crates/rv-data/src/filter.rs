//! Cohort filtering and sample extraction
//!
//! Plots never see raw records; they see either paired samples (scatter)
//! or `(category, value)` distribution samples (box/violin), extracted
//! here after the active cohort filter is applied.

use serde::{Deserialize, Serialize};

use crate::manifestation::Manifestation;
use crate::record::{PatientRecord, Sex, TrackedVariant};

/// Optional sex/severity subgroup selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortFilter {
    pub sex: Option<Sex>,
    pub severity: Option<u8>,
}

impl CohortFilter {
    /// Whether a record belongs to the filtered cohort. Records missing
    /// a filtered attribute are excluded by that filter.
    pub fn matches(&self, record: &PatientRecord) -> bool {
        let sex_ok = match self.sex {
            Some(sex) => record.sex == Some(sex),
            None => true,
        };
        let severity_ok = match self.severity {
            Some(severity) => record.severity == Some(severity),
            None => true,
        };
        sex_ok && severity_ok
    }

    /// Same membership test for tracked variants (box/violin overlays
    /// respect the cohort filter; scatter does not).
    pub fn matches_tracked(&self, variant: &TrackedVariant) -> bool {
        let sex_ok = match self.sex {
            Some(sex) => variant.sex == Some(sex),
            None => true,
        };
        let severity_ok = match self.severity {
            Some(severity) => variant.severity == Some(severity),
            None => true,
        };
        sex_ok && severity_ok
    }

    pub fn is_unfiltered(&self) -> bool {
        self.sex.is_none() && self.severity.is_none()
    }
}

/// One scatter sample: paired onset ages for the two selected
/// manifestations. Identity is positional, two pairs may hold equal
/// values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OnsetPair {
    pub x: f64,
    pub y: f64,
}

/// Paired samples for a scatter plot. A patient contributes only when
/// both fields are recorded.
pub fn scatter_pairs(
    records: &[PatientRecord],
    filter: &CohortFilter,
    x: Manifestation,
    y: Manifestation,
) -> Vec<OnsetPair> {
    records
        .iter()
        .filter(|r| filter.matches(r))
        .filter_map(|r| {
            let x = r.onset(x)?;
            let y = r.onset(y)?;
            Some(OnsetPair { x, y })
        })
        .collect()
}

/// `(category, value)` samples for box/violin plots. With `only` set,
/// a single category is extracted; otherwise all four.
pub fn distribution_samples(
    records: &[PatientRecord],
    filter: &CohortFilter,
    only: Option<Manifestation>,
) -> Vec<(Manifestation, f64)> {
    let categories: &[Manifestation] = match only {
        Some(ref m) => std::slice::from_ref(m),
        None => &Manifestation::ALL,
    };
    let mut samples = Vec::new();
    for record in records.iter().filter(|r| filter.matches(r)) {
        for &category in categories {
            if let Some(value) = record.onset(category) {
                samples.push((category, value));
            }
        }
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        dm: Option<f64>,
        oa: Option<f64>,
        sex: Option<Sex>,
        severity: Option<u8>,
    ) -> PatientRecord {
        PatientRecord {
            dm,
            oa,
            sex,
            severity,
            ..Default::default()
        }
    }

    #[test]
    fn test_scatter_pairs_require_both_fields() {
        let records = vec![
            record(Some(5.0), Some(10.0), None, None),
            record(Some(6.0), None, None, None),
            record(None, Some(8.0), None, None),
        ];
        let pairs = scatter_pairs(
            &records,
            &CohortFilter::default(),
            Manifestation::DiabetesMellitus,
            Manifestation::OpticAtrophy,
        );
        assert_eq!(pairs, vec![OnsetPair { x: 5.0, y: 10.0 }]);
    }

    #[test]
    fn test_zero_onset_is_kept() {
        let records = vec![record(Some(0.0), Some(3.0), None, None)];
        let pairs = scatter_pairs(
            &records,
            &CohortFilter::default(),
            Manifestation::DiabetesMellitus,
            Manifestation::OpticAtrophy,
        );
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].x, 0.0);

        let samples = distribution_samples(&records, &CohortFilter::default(), None);
        assert!(samples.contains(&(Manifestation::DiabetesMellitus, 0.0)));
    }

    #[test]
    fn test_sex_filter_excludes_missing_attribute() {
        let records = vec![
            record(Some(1.0), None, Some(Sex::Male), None),
            record(Some(2.0), None, Some(Sex::Female), None),
            record(Some(3.0), None, None, None),
        ];
        let filter = CohortFilter {
            sex: Some(Sex::Male),
            severity: None,
        };
        let samples = distribution_samples(&records, &filter, None);
        assert_eq!(samples, vec![(Manifestation::DiabetesMellitus, 1.0)]);
    }

    #[test]
    fn test_severity_filter() {
        let records = vec![
            record(Some(1.0), None, None, Some(3)),
            record(Some(2.0), None, None, Some(4)),
        ];
        let filter = CohortFilter {
            sex: None,
            severity: Some(4),
        };
        let samples = distribution_samples(&records, &filter, None);
        assert_eq!(samples, vec![(Manifestation::DiabetesMellitus, 2.0)]);
    }

    #[test]
    fn test_single_category_extraction() {
        let records = vec![record(Some(1.0), Some(2.0), None, None)];
        let samples = distribution_samples(
            &records,
            &CohortFilter::default(),
            Some(Manifestation::OpticAtrophy),
        );
        assert_eq!(samples, vec![(Manifestation::OpticAtrophy, 2.0)]);
    }

    #[test]
    fn test_all_categories_in_declaration_order() {
        let mut r = record(Some(1.0), Some(2.0), None, None);
        r.di = Some(3.0);
        r.hl = Some(4.0);
        let samples = distribution_samples(&[r], &CohortFilter::default(), None);
        let categories: Vec<_> = samples.iter().map(|(m, _)| *m).collect();
        assert_eq!(categories, Manifestation::ALL.to_vec());
    }

    #[test]
    fn test_tracked_filter_matches() {
        let variant = TrackedVariant {
            sex: Some(Sex::Female),
            severity: Some(2),
            ..Default::default()
        };
        let filter = CohortFilter {
            sex: Some(Sex::Female),
            severity: None,
        };
        assert!(filter.matches_tracked(&variant));
        let stricter = CohortFilter {
            sex: Some(Sex::Female),
            severity: Some(3),
        };
        assert!(!stricter.matches_tracked(&variant));
    }
}
