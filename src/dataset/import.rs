//! Dataset importer: appends every row of a CSV file to `district_data`.
//!
//! Rows are inserted in file order inside one transaction, so stored ids
//! follow the file. No validation or dedup happens here; a row that fails to
//! parse aborts the import before anything is written.

use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::{info, Instrument};

use super::rows::{open_csv, row_error, DatasetRow};
use crate::errors::Result;
use crate::storage::{DistrictRecordRepository, NewDistrictRecord};

/// Result of an import run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub rows_read: u64,
    pub rows_inserted: u64,
}

fn parse_rows<R: Read>(reader: &mut csv::Reader<R>) -> Result<Vec<NewDistrictRecord>> {
    reader
        .deserialize::<DatasetRow>()
        .map(|row| row.map(NewDistrictRecord::from).map_err(row_error))
        .collect()
}

/// Import a dataset file into storage.
pub async fn import_file(
    repository: &DistrictRecordRepository,
    path: &Path,
) -> Result<ImportSummary> {
    let records = parse_rows(&mut open_csv(path)?)?;
    let rows_read = records.len() as u64;

    info!(path = %path.display(), rows = rows_read, "Parsed dataset file");

    let rows_inserted = repository
        .insert_many(&records)
        .instrument(crate::db_span!("import_dataset", rows = rows_read))
        .await?;

    info!(
        path = %path.display(),
        rows_read = rows_read,
        rows_inserted = rows_inserted,
        "Dataset import completed"
    );

    Ok(ImportSummary { rows_read, rows_inserted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::rows::csv_reader;
    use crate::errors::Error;
    use crate::storage::test_helpers::TestDatabase;
    use std::io::Write;

    const SAMPLE: &str = "fin_year,month,district_code,district_name,persondays_of_central_liability_so_far\n\
                          2023-2024,Jan,0101,Nagpur,100\n\
                          2023-2024,Jan,0202,Amravati,50.5\n\
                          2023-2024,Feb,0101,Nagpur,150\n";

    #[test]
    fn test_parse_rows_keeps_file_order() {
        let records = parse_rows(&mut csv_reader(SAMPLE.as_bytes())).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].district_name, "Nagpur");
        assert_eq!(records[1].persondays_of_central_liability_so_far, 50.5);
        assert_eq!(records[2].month, "Feb");
    }

    #[test]
    fn test_parse_rows_reports_bad_line() {
        let data = "fin_year,month,district_code,district_name,persondays_of_central_liability_so_far\n\
                    2023-2024,Jan,0101,Nagpur,100\n\
                    2023-2024,Feb,0101,Nagpur,not-a-number\n";

        let err = parse_rows(&mut csv_reader(data.as_bytes())).unwrap_err();
        assert!(matches!(err, Error::Csv { .. }));
        assert!(err.to_string().contains("line 3"), "unexpected error: {}", err);
    }

    #[tokio::test]
    async fn test_import_file_appends_in_order() {
        let db = TestDatabase::new().await;
        let repo = db.repository();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let summary = import_file(&repo, file.path()).await.unwrap();
        assert_eq!(summary, ImportSummary { rows_read: 3, rows_inserted: 3 });

        let stored = repo.list_all().await.unwrap();
        let codes: Vec<&str> = stored.iter().map(|r| r.district_code.as_str()).collect();
        assert_eq!(codes, vec!["0101", "0202", "0101"]);

        let latest = repo.latest_per_district().await.unwrap();
        let nagpur = latest.iter().find(|r| r.district_code == "0101").unwrap();
        assert_eq!(nagpur.month, "Feb");
    }

    #[tokio::test]
    async fn test_failed_parse_writes_nothing() {
        let db = TestDatabase::new().await;
        let repo = db.repository();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"fin_year,month,district_code,district_name,persondays_of_central_liability_so_far\n2023-2024,Jan,0101,Nagpur,oops\n")
            .unwrap();

        assert!(import_file(&repo, file.path()).await.is_err());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
