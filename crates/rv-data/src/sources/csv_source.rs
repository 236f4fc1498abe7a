//! CSV source for registry exports
//!
//! Expects a header row with the four onset columns (`dm`, `oa`, `di`,
//! `hl`); sex, severity, allele, and inheritance columns are optional.
//! Blank cells are missing values. A non-blank cell that fails to parse
//! as a number fails the whole load; a malformed sex or severity cell
//! only drops that attribute.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use csv::{ReaderBuilder, StringRecord};
use tracing::{info, warn};

use crate::record::{PatientRecord, Sex, SEVERITY_RANGE};
use crate::sources::RegistrySource;
use crate::RegistryError;

/// CSV-backed registry source.
pub struct CsvSource {
    path: PathBuf,
    name: String,
}

impl CsvSource {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }

    fn read_file(path: &Path) -> Result<Vec<PatientRecord>, RegistryError> {
        let file = File::open(path)?;
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));
        Self::parse_reader(reader)
    }

    fn parse_reader<R: std::io::Read>(
        mut reader: csv::Reader<R>,
    ) -> Result<Vec<PatientRecord>, RegistryError> {
        let headers = reader.headers()?.clone();
        let columns = Columns::resolve(&headers)?;

        let mut records = Vec::new();
        for (idx, row) in reader.records().enumerate() {
            let row = row?;
            // Row numbers are 1-based and include the header line.
            records.push(columns.parse_row(&row, idx + 2)?);
        }
        Ok(records)
    }
}

#[async_trait]
impl RegistrySource for CsvSource {
    async fn fetch_patients(&self) -> anyhow::Result<Vec<PatientRecord>> {
        let path = self.path.clone();
        let records = tokio::task::spawn_blocking(move || CsvSource::read_file(&path)).await??;
        info!(
            "Loaded {} patient records from {:?}",
            records.len(),
            self.path
        );
        Ok(records)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

/// Resolved header positions.
struct Columns {
    dm: usize,
    oa: usize,
    di: usize,
    hl: usize,
    sex: Option<usize>,
    severity: Option<usize>,
    allele_1: Option<usize>,
    allele_2: Option<usize>,
    inheritance: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, RegistryError> {
        let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
        let require = |name: &'static str| {
            find(name).ok_or_else(|| RegistryError::Schema(format!("missing column '{name}'")))
        };
        Ok(Self {
            dm: require("dm")?,
            oa: require("oa")?,
            di: require("di")?,
            hl: require("hl")?,
            sex: find("sex"),
            severity: find("severity"),
            allele_1: find("allele_1"),
            allele_2: find("allele_2"),
            inheritance: find("inheritance"),
        })
    }

    fn parse_row(&self, row: &StringRecord, line: usize) -> Result<PatientRecord, RegistryError> {
        Ok(PatientRecord {
            dm: parse_onset(row, self.dm, "dm", line)?,
            oa: parse_onset(row, self.oa, "oa", line)?,
            di: parse_onset(row, self.di, "di", line)?,
            hl: parse_onset(row, self.hl, "hl", line)?,
            sex: self.sex.and_then(|i| parse_sex(cell(row, i), line)),
            severity: self
                .severity
                .and_then(|i| parse_severity(cell(row, i), line)),
            allele_1: self.allele_1.and_then(|i| parse_text(cell(row, i))),
            allele_2: self.allele_2.and_then(|i| parse_text(cell(row, i))),
            inheritance: self.inheritance.and_then(|i| parse_text(cell(row, i))),
        })
    }
}

fn cell<'a>(row: &'a StringRecord, index: usize) -> &'a str {
    row.get(index).unwrap_or("")
}

fn parse_onset(
    row: &StringRecord,
    index: usize,
    column: &'static str,
    line: usize,
) -> Result<Option<f64>, RegistryError> {
    let value = cell(row, index);
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|_| RegistryError::InvalidValue {
            column,
            value: value.to_string(),
            row: line,
        })
}

fn parse_sex(value: &str, line: usize) -> Option<Sex> {
    if value.is_empty() {
        return None;
    }
    match value {
        "0" => Some(Sex::Male),
        "1" => Some(Sex::Female),
        _ if value.eq_ignore_ascii_case("male") => Some(Sex::Male),
        _ if value.eq_ignore_ascii_case("female") => Some(Sex::Female),
        _ => {
            warn!("unrecognized sex value {:?} at row {}, dropped", value, line);
            None
        }
    }
}

fn parse_severity(value: &str, line: usize) -> Option<u8> {
    if value.is_empty() {
        return None;
    }
    match value.parse::<u8>() {
        Ok(severity) if SEVERITY_RANGE.contains(&severity) => Some(severity),
        _ => {
            warn!(
                "severity {:?} at row {} outside {:?}, dropped",
                value, line, SEVERITY_RANGE
            );
            None
        }
    }
}

fn parse_text(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
