//! # REST API
//!
//! Read-only JSON endpoints over stored district records, plus an optional
//! catch-all that serves a built single-page application.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use routes::{build_router, ApiState};
pub use server::start_api_server;
