//! Database repositories.

pub mod district_record;

pub use district_record::{
    DistrictRecord, DistrictRecordRepository, DistrictSummary, NewDistrictRecord,
};
