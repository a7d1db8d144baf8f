//! Business logic services
//!
//! Services sit between the HTTP handlers and the repositories and own the
//! not-found and input-validation rules of each operation.

pub mod record_query;

pub use record_query::RecordQueryService;
