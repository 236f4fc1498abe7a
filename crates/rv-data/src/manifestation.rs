//! The four tracked disease manifestations

use std::fmt;

use serde::{Deserialize, Serialize};

/// A manifestation category with a fixed short field key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Manifestation {
    DiabetesMellitus,
    OpticAtrophy,
    DiabetesInsipidus,
    HearingLoss,
}

impl Manifestation {
    /// Display order used for selectors and band axes.
    pub const ALL: [Manifestation; 4] = [
        Manifestation::DiabetesMellitus,
        Manifestation::OpticAtrophy,
        Manifestation::DiabetesInsipidus,
        Manifestation::HearingLoss,
    ];

    /// Short record-field key (`dm`, `oa`, `di`, `hl`).
    pub fn key(self) -> &'static str {
        match self {
            Manifestation::DiabetesMellitus => "dm",
            Manifestation::OpticAtrophy => "oa",
            Manifestation::DiabetesInsipidus => "di",
            Manifestation::HearingLoss => "hl",
        }
    }

    /// Human-readable category label.
    pub fn label(self) -> &'static str {
        match self {
            Manifestation::DiabetesMellitus => "Diabetes Mellitus",
            Manifestation::OpticAtrophy => "Optic Atrophy",
            Manifestation::DiabetesInsipidus => "Diabetes Insipidus",
            Manifestation::HearingLoss => "Hearing Loss",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Manifestation::ALL.into_iter().find(|m| m.key() == key)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Manifestation::ALL.into_iter().find(|m| m.label() == label)
    }
}

impl fmt::Display for Manifestation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
