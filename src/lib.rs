//! # District Data
//!
//! A read-only REST backend over district-level program records (keyed by
//! financial year, month, and district code), together with the tooling that
//! loads a dataset CSV into the store and measures how many of its rows share
//! a (fin_year, month, district_code) key.
//!
//! ## Architecture
//!
//! ```text
//! HTTP router → RecordQueryService → DistrictRecordRepository → SQLite
//! CSV file → dataset::rows → dedup counter | importer → repository
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod observability;
pub mod services;
pub mod storage;

pub use config::Config;
pub use errors::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
