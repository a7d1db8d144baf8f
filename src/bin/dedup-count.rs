//! One-off dataset check: counts total rows against unique
//! (fin_year, month, district_code) combinations.
//!
//! Usage: `dedup-count [path]` (defaults to `data/district_data.csv`).

use std::path::PathBuf;

use district_data::dataset::{count_unique_keys_in_file, DEFAULT_DATASET_PATH};

fn main() -> anyhow::Result<()> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH));

    let report = count_unique_keys_in_file(&path)?;
    println!("{}", report);

    Ok(())
}
