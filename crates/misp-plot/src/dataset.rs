// File: crates/misp-plot/src/dataset.rs
// Summary: Predictor result rows loaded from CSV and grouped per testcase.

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{PlotError, Result};

pub const TESTCASE_COLUMN: &str = "TESTCASE";
pub const HISTORY_BITS_COLUMN: &str = "history_bits";
pub const MISP_RATE_COLUMN: &str = "misp_rate";

/// Columns every input must carry; others are ignored.
pub const REQUIRED_COLUMNS: [&str; 3] = [TESTCASE_COLUMN, HISTORY_BITS_COLUMN, MISP_RATE_COLUMN];

/// One row of simulation output.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "TESTCASE")]
    pub testcase: String,
    pub history_bits: f64,
    /// Percent, 0..=100.
    pub misp_rate: f64,
}

/// Points of one testcase in input row order.
#[derive(Clone, Debug, PartialEq)]
pub struct TestcaseSeries {
    pub testcase: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Clone, Debug, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Load a CSV file with a header row.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => PlotError::InputNotFound { path: path.to_path_buf() },
            _ => PlotError::InputRead { path: path.to_path_buf(), source },
        })?;
        Self::from_reader(file, path)
    }

    /// Parse CSV from `reader`; `source` names the input in errors.
    pub fn from_reader<R: io::Read>(reader: R, source: &Path) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| csv_error(source, None, 1, e))?
            .clone();
        debug!(headers = ?headers.iter().collect::<Vec<_>>(), "read CSV header");
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(PlotError::MissingColumn { path: source.to_path_buf(), column });
            }
        }

        let mut records = Vec::new();
        for row in rdr.records() {
            let row = row.map_err(|e| csv_error(source, Some(&headers), 0, e))?;
            let line = row.position().map_or(0, |p| p.line());
            let record: Record = row
                .deserialize(Some(&headers))
                .map_err(|e| csv_error(source, Some(&headers), line, e))?;
            for (column, value) in [
                (HISTORY_BITS_COLUMN, record.history_bits),
                (MISP_RATE_COLUMN, record.misp_rate),
            ] {
                if !value.is_finite() {
                    return Err(PlotError::MalformedInput {
                        path: source.to_path_buf(),
                        column: column.to_string(),
                        line,
                        reason: format!("value {value} is not a finite number"),
                    });
                }
            }
            records.push(record);
        }
        debug!(rows = records.len(), "loaded dataset from {}", source.display());
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct testcases in order of first appearance.
    pub fn testcases(&self) -> Vec<&str> {
        self.group_by_testcase_ref().into_iter().map(|(name, _)| name).collect()
    }

    /// Partition rows by testcase, keeping first-appearance order between groups
    /// and row order within each group.
    pub fn group_by_testcase(&self) -> Vec<TestcaseSeries> {
        self.group_by_testcase_ref()
            .into_iter()
            .map(|(name, rows)| TestcaseSeries {
                testcase: name.to_string(),
                points: rows.iter().map(|r| (r.history_bits, r.misp_rate)).collect(),
            })
            .collect()
    }

    fn group_by_testcase_ref(&self) -> Vec<(&str, Vec<&Record>)> {
        let mut groups: Vec<(&str, Vec<&Record>)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for record in &self.records {
            let slot = *index.entry(record.testcase.as_str()).or_insert_with(|| {
                groups.push((record.testcase.as_str(), Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(record);
        }
        groups
    }
}

/// Map a csv failure onto the error taxonomy. `line` is used when the error carries no position.
fn csv_error(
    source: &Path,
    headers: Option<&csv::StringRecord>,
    line: u64,
    err: csv::Error,
) -> PlotError {
    let path: PathBuf = source.to_path_buf();
    let column_name = |field: Option<u64>| -> String {
        field
            .and_then(|i| headers.and_then(|h| h.get(i as usize)))
            .map_or_else(|| "?".to_string(), str::to_string)
    };
    match err.into_kind() {
        csv::ErrorKind::Io(source) => PlotError::InputRead { path, source },
        csv::ErrorKind::Deserialize { pos, err } => PlotError::MalformedInput {
            path,
            column: column_name(err.field()),
            line: pos.map_or(line, |p| p.line()),
            reason: err.kind().to_string(),
        },
        csv::ErrorKind::Utf8 { pos, err } => PlotError::MalformedInput {
            path,
            column: column_name(Some(err.field() as u64)),
            line: pos.map_or(line, |p| p.line()),
            reason: "invalid UTF-8".to_string(),
        },
        csv::ErrorKind::UnequalLengths { pos, expected_len, len } => PlotError::MalformedInput {
            path,
            column: "*".to_string(),
            line: pos.map_or(line, |p| p.line()),
            reason: format!("expected {expected_len} fields, found {len}"),
        },
        other => PlotError::MalformedInput {
            path,
            column: "*".to_string(),
            line,
            reason: format!("{other:?}"),
        },
    }
}
