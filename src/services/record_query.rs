//! Record query service
//!
//! Read-only queries behind the REST endpoints. Every operation is a single
//! repository call; the service adds the "blank code" and "no rows" rules.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::errors::{Error, Result};
use crate::storage::{DistrictRecord, DistrictRecordRepository, DistrictSummary};

/// Read-only queries over stored district records.
#[derive(Debug, Clone)]
pub struct RecordQueryService {
    repository: Arc<DistrictRecordRepository>,
}

impl RecordQueryService {
    pub fn new(repository: Arc<DistrictRecordRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &DistrictRecordRepository {
        &self.repository
    }

    /// Distinct districts, alphabetical by name.
    #[instrument(skip(self), name = "list_districts")]
    pub async fn list_districts(&self) -> Result<Vec<DistrictSummary>> {
        let districts = self.repository.list_districts().await?;
        debug!(count = districts.len(), "Listed districts");
        Ok(districts)
    }

    /// All records of one district in insertion order.
    ///
    /// A blank code is a validation error; a code with no rows is not found.
    #[instrument(skip(self), name = "records_for_district")]
    pub async fn records_for_district(&self, district_code: &str) -> Result<Vec<DistrictRecord>> {
        let district_code = district_code.trim();
        if district_code.is_empty() {
            return Err(Error::validation("District code is required"));
        }

        let records = self.repository.list_by_district(district_code).await?;
        if records.is_empty() {
            return Err(Error::not_found(format!(
                "No records found for district code '{}'",
                district_code
            )));
        }

        debug!(district_code = %district_code, count = records.len(), "Listed district records");
        Ok(records)
    }

    /// Every stored record in insertion order.
    #[instrument(skip(self), name = "all_records")]
    pub async fn all_records(&self) -> Result<Vec<DistrictRecord>> {
        let records = self.repository.list_all().await?;
        debug!(count = records.len(), "Listed all district records");
        Ok(records)
    }

    /// One record per district: the one with the highest id.
    #[instrument(skip(self), name = "latest_per_district")]
    pub async fn latest_per_district(&self) -> Result<Vec<DistrictRecord>> {
        let records = self.repository.latest_per_district().await?;
        debug!(count = records.len(), "Computed latest record per district");
        Ok(records)
    }
}
