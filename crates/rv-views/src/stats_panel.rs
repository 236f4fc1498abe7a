//! Summary statistics rows for the sidebar panel
//!
//! Pure row model: the sidebar renders label/value pairs verbatim, so
//! rows carry preformatted strings in a fixed display order. An empty
//! cohort yields no rows and the sidebar shows its own placeholder.

use rv_data::{distribution_samples, scatter_pairs, CohortFilter, Manifestation, PatientRecord};

use crate::plots::utils::stats::{linear_regression, pearson_correlation, summarize};

/// Per-axis pairing rows keep this order regardless of which field is x.
const AXIS_ORDER: [Manifestation; 4] = [
    Manifestation::DiabetesMellitus,
    Manifestation::OpticAtrophy,
    Manifestation::HearingLoss,
    Manifestation::DiabetesInsipidus,
];

/// One rendered sidebar row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRow {
    pub label: String,
    pub value: String,
}

impl StatRow {
    fn new(label: impl Into<String>, value: String) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// What the panel summarizes, derived from the active plot's config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsScope {
    /// One manifestation, or all four pooled when `None`.
    Distribution(Option<Manifestation>),
    /// The scatter pairing.
    Pairing { x: Manifestation, y: Manifestation },
}

impl StatsScope {
    /// Heading text for the sidebar.
    pub fn title(&self) -> String {
        match self {
            StatsScope::Distribution(None) => "All Data".to_owned(),
            StatsScope::Distribution(Some(m)) => m.label().to_owned(),
            StatsScope::Pairing { x, y } => format!("{} vs {}", x.label(), y.label()),
        }
    }
}

/// Stat rows for a scope over the filtered cohort. Empty extraction
/// yields an empty row list, never an error.
pub fn stat_rows(
    records: &[PatientRecord],
    filter: &CohortFilter,
    scope: StatsScope,
) -> Vec<StatRow> {
    match scope {
        StatsScope::Distribution(only) => distribution_rows(records, filter, only),
        StatsScope::Pairing { x, y } => pairing_rows(records, filter, x, y),
    }
}

fn distribution_rows(
    records: &[PatientRecord],
    filter: &CohortFilter,
    only: Option<Manifestation>,
) -> Vec<StatRow> {
    let values: Vec<f64> = distribution_samples(records, filter, only)
        .into_iter()
        .map(|(_, value)| value)
        .collect();
    let Some(summary) = summarize(&values) else {
        return Vec::new();
    };

    vec![
        StatRow::new("Count", summary.count.to_string()),
        StatRow::new("Mean", format!("{:.2}", summary.mean)),
        StatRow::new("Median", format!("{:.2}", summary.median)),
        StatRow::new("Standard Deviation", format!("{:.2}", summary.std_dev)),
        StatRow::new("Minimum", format!("{:.2}", summary.min)),
        StatRow::new("First Quartile", format!("{:.2}", summary.q1)),
        StatRow::new("Third Quartile", format!("{:.2}", summary.q3)),
        StatRow::new("Maximum", format!("{:.2}", summary.max)),
    ]
}

fn pairing_rows(
    records: &[PatientRecord],
    filter: &CohortFilter,
    x_field: Manifestation,
    y_field: Manifestation,
) -> Vec<StatRow> {
    let pairs = scatter_pairs(records, filter, x_field, y_field);
    if pairs.is_empty() {
        return Vec::new();
    }
    let xy: Vec<(f64, f64)> = pairs.iter().map(|p| (p.x, p.y)).collect();

    let mut rows = vec![StatRow::new("Sample Size", pairs.len().to_string())];
    if let Some(r) = pearson_correlation(&xy) {
        rows.push(StatRow::new("Correlation Coefficient", format!("{r:.3}")));
    }
    if let Some(fit) = linear_regression(&xy) {
        rows.push(StatRow::new("Regression Slope", format!("{:.3}", fit.slope)));
        rows.push(StatRow::new(
            "Regression Intercept",
            format!("{:.3}", fit.intercept),
        ));
    }

    for axis in AXIS_ORDER {
        // With x and y set to the same field, the pair of rows appears once.
        let values: Vec<f64> = if axis == x_field {
            pairs.iter().map(|p| p.x).collect()
        } else if axis == y_field {
            pairs.iter().map(|p| p.y).collect()
        } else {
            continue;
        };
        if let Some(summary) = summarize(&values) {
            rows.push(StatRow::new(
                format!("{} Mean", axis.label()),
                format!("{:.2}", summary.mean),
            ));
            rows.push(StatRow::new(
                format!("{} Std Dev", axis.label()),
                format!("{:.2}", summary.std_dev),
            ));
        }
    }
    rows
}
