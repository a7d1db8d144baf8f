//! District record repository
//!
//! Append and read operations over the `district_data` table. Rows are never
//! updated in place; the autoincrement `id` is the only ordering the table
//! carries.

use crate::errors::{Error, Result};
use crate::storage::DbPool;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracing::instrument;

const RECORD_COLUMNS: &str =
    "id, district_code, district_name, fin_year, month, persondays_of_central_liability_so_far";

/// Internal database row structure for district records.
#[derive(Debug, Clone, FromRow)]
struct DistrictRecordRow {
    pub id: i64,
    pub district_code: String,
    pub district_name: String,
    pub fin_year: String,
    pub month: String,
    pub persondays_of_central_liability_so_far: f64,
}

/// A stored district record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictRecord {
    pub id: i64,
    pub district_code: String,
    pub district_name: String,
    pub fin_year: String,
    pub month: String,
    pub persondays_of_central_liability_so_far: f64,
}

impl From<DistrictRecordRow> for DistrictRecord {
    fn from(row: DistrictRecordRow) -> Self {
        Self {
            id: row.id,
            district_code: row.district_code,
            district_name: row.district_name,
            fin_year: row.fin_year,
            month: row.month,
            persondays_of_central_liability_so_far: row.persondays_of_central_liability_so_far,
        }
    }
}

/// A distinct district as shown in selection lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow)]
pub struct DistrictSummary {
    pub district_code: String,
    pub district_name: String,
}

/// A record to append; the id is assigned by the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDistrictRecord {
    pub district_code: String,
    pub district_name: String,
    pub fin_year: String,
    pub month: String,
    pub persondays_of_central_liability_so_far: f64,
}

/// Repository for district record persistence.
#[derive(Debug, Clone)]
pub struct DistrictRecordRepository {
    pool: DbPool,
}

impl DistrictRecordRepository {
    /// Creates a new repository with the given database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Access the underlying pool.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Lists distinct (code, name) pairs ordered by name, then code.
    #[instrument(skip(self), name = "db_list_districts")]
    pub async fn list_districts(&self) -> Result<Vec<DistrictSummary>> {
        sqlx::query_as::<_, DistrictSummary>(
            "SELECT DISTINCT district_code, district_name FROM district_data \
             ORDER BY district_name ASC, district_code ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to list districts");
            Error::database(e, "Failed to list districts")
        })
    }

    /// Lists every record for one district in insertion order.
    #[instrument(skip(self), fields(district_code = %district_code), name = "db_list_records_by_district")]
    pub async fn list_by_district(&self, district_code: &str) -> Result<Vec<DistrictRecord>> {
        let rows = sqlx::query_as::<_, DistrictRecordRow>(&format!(
            "SELECT {RECORD_COLUMNS} FROM district_data WHERE district_code = ? ORDER BY id ASC"
        ))
        .bind(district_code)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, district_code = %district_code, "Failed to list district records");
            Error::database(e, format!("Failed to list records for district '{}'", district_code))
        })?;

        Ok(rows.into_iter().map(DistrictRecord::from).collect())
    }

    /// Lists every record in insertion order.
    #[instrument(skip(self), name = "db_list_all_records")]
    pub async fn list_all(&self) -> Result<Vec<DistrictRecord>> {
        let rows = sqlx::query_as::<_, DistrictRecordRow>(&format!(
            "SELECT {RECORD_COLUMNS} FROM district_data ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to list all district records");
            Error::database(e, "Failed to list all district records")
        })?;

        Ok(rows.into_iter().map(DistrictRecord::from).collect())
    }

    /// Returns the highest-id record of each district, ordered by name then code.
    ///
    /// "Latest" here means most recently inserted. Nothing checks that the
    /// insertion order matches the (fin_year, month) reporting period, so a
    /// back-filled older period will win over a newer one loaded earlier.
    #[instrument(skip(self), name = "db_latest_record_per_district")]
    pub async fn latest_per_district(&self) -> Result<Vec<DistrictRecord>> {
        let rows = sqlx::query_as::<_, DistrictRecordRow>(&format!(
            "SELECT {RECORD_COLUMNS} FROM district_data \
             WHERE id IN (SELECT MAX(id) FROM district_data GROUP BY district_code) \
             ORDER BY district_name ASC, district_code ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to compute latest record per district");
            Error::database(e, "Failed to compute latest record per district")
        })?;

        Ok(rows.into_iter().map(DistrictRecord::from).collect())
    }

    /// Appends records in slice order inside one transaction, so the assigned
    /// ids follow the slice. Returns the number of rows inserted.
    #[instrument(skip(self, records), fields(count = records.len()), name = "db_insert_district_records")]
    pub async fn insert_many(&self, records: &[NewDistrictRecord]) -> Result<u64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::database(e, "Failed to start import transaction"))?;

        let mut inserted = 0u64;
        for record in records {
            let result = sqlx::query(
                "INSERT INTO district_data (district_code, district_name, fin_year, month, persondays_of_central_liability_so_far) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&record.district_code)
            .bind(&record.district_name)
            .bind(&record.fin_year)
            .bind(&record.month)
            .bind(record.persondays_of_central_liability_so_far)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, district_code = %record.district_code, "Failed to insert district record");
                Error::database(
                    e,
                    format!("Failed to insert record for district '{}'", record.district_code),
                )
            })?;
            inserted += result.rows_affected();
        }

        tx.commit().await.map_err(|e| Error::database(e, "Failed to commit import transaction"))?;

        tracing::info!(count = inserted, "Inserted district records");
        Ok(inserted)
    }

    /// Counts stored records.
    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM district_data")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Error::database(e, "Failed to count district records"))
    }
}
