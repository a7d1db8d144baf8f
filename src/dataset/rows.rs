//! CSV row model for the district dataset.
//!
//! Columns are matched by header name and extra columns are ignored, so both
//! trimmed exports and full upstream dumps parse.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::errors::{Error, Result};
use crate::storage::NewDistrictRecord;

/// The composite key the dedup counter measures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct DatasetKey {
    pub fin_year: String,
    pub month: String,
    pub district_code: String,
}

/// One full dataset row as needed for import.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatasetRow {
    pub fin_year: String,
    pub month: String,
    pub district_code: String,
    pub district_name: String,
    #[serde(alias = "Persondays_of_Central_Liability_so_far")]
    pub persondays_of_central_liability_so_far: f64,
}

impl From<DatasetRow> for NewDistrictRecord {
    fn from(row: DatasetRow) -> Self {
        Self {
            district_code: row.district_code,
            district_name: row.district_name,
            fin_year: row.fin_year,
            month: row.month,
            persondays_of_central_liability_so_far: row.persondays_of_central_liability_so_far,
        }
    }
}

/// CSV reader over any byte source, with headers and trimmed fields.
pub fn csv_reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(source)
}

/// Open a dataset file for reading.
pub fn open_csv(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    let file = std::fs::File::open(path)
        .map_err(|e| Error::io(e, format!("Failed to open dataset file {}", path.display())))?;
    Ok(csv_reader(file))
}

/// Wrap a CSV error with the line it occurred on, when known.
pub(crate) fn row_error(error: csv::Error) -> Error {
    let context = match error.position() {
        Some(position) => format!("Failed to parse dataset row at line {}", position.line()),
        None => "Failed to parse dataset row".to_string(),
    };
    Error::csv(error, context)
}
