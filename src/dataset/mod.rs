//! # Dataset Files
//!
//! CSV handling for the district dataset: the row model, the dedup counter
//! that measures how many rows share a (fin_year, month, district_code) key,
//! and the importer that appends a file's rows to storage.

pub mod dedup;
pub mod import;
pub mod rows;

pub use dedup::{count_unique_keys, count_unique_keys_in_file, DedupReport, DEFAULT_DATASET_PATH};
pub use import::{import_file, ImportSummary};
pub use rows::{DatasetKey, DatasetRow};
