//! HTTP handlers.

pub mod districts;
pub mod health;

pub use districts::{
    all_district_records_handler, district_records_handler, list_districts_handler,
    map_data_handler, missing_district_code_handler,
};
pub use health::health_handler;
