//! Dedup counter: total rows versus unique (fin_year, month, district_code)
//! keys in a dataset file. Measures duplication, never removes it.

use std::collections::HashSet;
use std::fmt;
use std::io::Read;
use std::path::Path;

use tracing::info;

use super::rows::{csv_reader, open_csv, row_error, DatasetKey};
use crate::errors::Result;

/// Dataset file the one-off counter reads when no path is given.
pub const DEFAULT_DATASET_PATH: &str = "data/district_data.csv";

/// Outcome of a dedup count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupReport {
    pub total_rows: u64,
    pub unique_keys: u64,
}

impl DedupReport {
    /// Rows whose key was already seen earlier in the file.
    pub fn duplicate_rows(&self) -> u64 {
        self.total_rows - self.unique_keys
    }
}

impl fmt::Display for DedupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total rows: {}", self.total_rows)?;
        writeln!(f, "Unique (fin_year, month, district_code) combinations: {}", self.unique_keys)?;
        write!(f, "Duplicate rows: {}", self.duplicate_rows())
    }
}

/// Count rows and unique composite keys in CSV data. Fails on the first
/// unparsable row.
pub fn count_unique_keys<R: Read>(source: R) -> Result<DedupReport> {
    count_keys(&mut csv_reader(source))
}

fn count_keys<R: Read>(reader: &mut csv::Reader<R>) -> Result<DedupReport> {
    let mut keys = HashSet::new();
    let mut total_rows = 0u64;

    for key in reader.deserialize::<DatasetKey>() {
        keys.insert(key.map_err(row_error)?);
        total_rows += 1;
    }

    Ok(DedupReport { total_rows, unique_keys: keys.len() as u64 })
}

/// Count rows and unique composite keys in a dataset file.
pub fn count_unique_keys_in_file(path: &Path) -> Result<DedupReport> {
    let report = count_keys(&mut open_csv(path)?)?;

    info!(
        path = %path.display(),
        total_rows = report.total_rows,
        unique_keys = report.unique_keys,
        "Counted unique dataset keys"
    );

    Ok(report)
}
