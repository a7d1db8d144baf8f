//! # Error Handling
//!
//! Error types for the district data service, built with `thiserror`.
//! Library code returns [`Result`]; binaries wrap it in `anyhow`.

pub mod types;

pub use types::{Error, Result};
