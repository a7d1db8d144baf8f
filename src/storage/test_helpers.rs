//! Test database utilities for in-library tests.
//!
//! Each `TestDatabase` is a private in-memory SQLite database, so tests are
//! isolated from one another without any external services.
//!
//! This module is only available in test builds (`#[cfg(test)]`).

use crate::config::DatabaseConfig;
use crate::storage::{create_pool, DbPool, DistrictRecordRepository, NewDistrictRecord};

/// An in-memory test database.
///
/// A single pooled connection is kept open for the lifetime of the pool, which
/// keeps the in-memory database alive.
pub struct TestDatabase {
    pub pool: DbPool,
}

impl TestDatabase {
    /// Create a new test database with all migrations applied.
    pub async fn new() -> Self {
        Self::with_migrations(true).await
    }

    /// Create a new test database without running migrations.
    pub async fn unmigrated() -> Self {
        Self::with_migrations(false).await
    }

    async fn with_migrations(auto_migrate: bool) -> Self {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            idle_timeout_seconds: 0,
            auto_migrate,
            ..Default::default()
        };

        let pool = create_pool(&config)
            .await
            .unwrap_or_else(|e| panic!("Failed to create in-memory test database: {}", e));

        Self { pool }
    }

    /// Repository over this database.
    pub fn repository(&self) -> DistrictRecordRepository {
        DistrictRecordRepository::new(self.pool.clone())
    }

    /// Append the given records in order; ids follow slice order.
    pub async fn seed(&self, records: &[NewDistrictRecord]) {
        self.repository()
            .insert_many(records)
            .await
            .unwrap_or_else(|e| panic!("Failed to seed test records: {}", e));
    }
}

/// Build a record with the given code, name, and period.
pub fn record(
    district_code: &str,
    district_name: &str,
    fin_year: &str,
    month: &str,
    persondays: f64,
) -> NewDistrictRecord {
    NewDistrictRecord {
        district_code: district_code.to_string(),
        district_name: district_name.to_string(),
        fin_year: fin_year.to_string(),
        month: month.to_string(),
        persondays_of_central_liability_so_far: persondays,
    }
}
