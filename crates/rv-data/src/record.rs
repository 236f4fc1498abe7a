//! Patient records and tracked variants
//!
//! Records are flat: one optional age-of-onset per manifestation plus
//! categorical attributes. A missing field means "not recorded" and is
//! excluded from every computation; `0.0` is a legal onset age and is
//! never treated as missing.

use serde::{Deserialize, Serialize};

use crate::manifestation::Manifestation;

/// Registry sex encoding: Male = 0, Female = 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn code(self) -> u8 {
        match self {
            Sex::Male => 0,
            Sex::Female => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Sex::Male),
            1 => Some(Sex::Female),
            _ => None,
        }
    }
}

/// Valid severity scores.
pub const SEVERITY_RANGE: std::ops::RangeInclusive<u8> = 1..=6;

/// One registry patient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub dm: Option<f64>,
    pub oa: Option<f64>,
    pub di: Option<f64>,
    pub hl: Option<f64>,
    pub sex: Option<Sex>,
    pub severity: Option<u8>,
    pub allele_1: Option<String>,
    pub allele_2: Option<String>,
    pub inheritance: Option<String>,
}

impl PatientRecord {
    /// Age of onset for one manifestation, if recorded.
    pub fn onset(&self, manifestation: Manifestation) -> Option<f64> {
        match manifestation {
            Manifestation::DiabetesMellitus => self.dm,
            Manifestation::OpticAtrophy => self.oa,
            Manifestation::DiabetesInsipidus => self.di,
            Manifestation::HearingLoss => self.hl,
        }
    }

    pub fn has_onset(&self, manifestation: Manifestation) -> bool {
        self.onset(manifestation).is_some()
    }
}

/// A user-tracked variant carrying the same onset fields as a patient
/// plus an optional display name. Tracked variants are overlay
/// annotations and never merged into group statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackedVariant {
    pub name: Option<String>,
    pub dm: Option<f64>,
    pub oa: Option<f64>,
    pub di: Option<f64>,
    pub hl: Option<f64>,
    pub sex: Option<Sex>,
    pub severity: Option<u8>,
    pub allele_1: Option<String>,
    pub allele_2: Option<String>,
    pub inheritance: Option<String>,
}

impl TrackedVariant {
    pub fn onset(&self, manifestation: Manifestation) -> Option<f64> {
        match manifestation {
            Manifestation::DiabetesMellitus => self.dm,
            Manifestation::OpticAtrophy => self.oa,
            Manifestation::DiabetesInsipidus => self.di,
            Manifestation::HearingLoss => self.hl,
        }
    }

    /// Label text: the stored name, or a positional fallback.
    pub fn display_name(&self, index: usize) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("Variant ({})", index + 1),
        }
    }
}
