//! # Schema Migrations
//!
//! The SQL files under `migrations/` are embedded with `sqlx::migrate!` and
//! applied by sqlx's [`Migrator`], which records each one with its checksum
//! in `_sqlx_migrations`. The helpers here report on that table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::{migrate::Migrator, Row};
use tracing::{info, warn};

use crate::errors::{Error, Result};
use crate::storage::DbPool;

/// Migrations compiled into this build, ordered by version.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// A row of the sqlx migration table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationInfo {
    pub version: i64,
    pub description: String,
    pub installed_on: chrono::DateTime<chrono::Utc>,
    pub success: bool,
    pub execution_time: i64,
    pub checksum: Vec<u8>,
}

/// Apply every embedded migration not yet recorded. Returns how many ran.
///
/// Fails without applying anything when a recorded migration no longer
/// matches the embedded SQL.
pub async fn run_migrations(pool: &DbPool) -> Result<usize> {
    let applied = applied_checksums(pool).await?;
    let pending = MIGRATOR.iter().filter(|m| !applied.contains_key(&m.version)).count();

    MIGRATOR.run(pool).await.map_err(|e| Error::database(e.into(), "Failed to apply migrations"))?;

    if pending == 0 {
        info!(applied = applied.len(), "Database schema is up to date");
    } else {
        info!(count = pending, "Applied database migrations");
    }
    Ok(pending)
}

fn is_missing_table(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db_err) if db_err.message().contains("no such table"))
}

/// Recorded version → checksum. A database that was never migrated has none.
async fn applied_checksums(pool: &DbPool) -> Result<BTreeMap<i64, Vec<u8>>> {
    Ok(list_applied_migrations(pool)
        .await?
        .into_iter()
        .map(|migration| (migration.version, migration.checksum))
        .collect())
}

/// True when exactly the embedded migrations are recorded, each applied
/// successfully with an unchanged checksum.
pub async fn validate_migrations(pool: &DbPool) -> Result<bool> {
    let applied = list_applied_migrations(pool).await?;
    let mut valid = true;

    for migration in MIGRATOR.iter() {
        match applied.iter().find(|a| a.version == migration.version) {
            None => {
                warn!(version = migration.version, "Migration {} not applied", migration.description);
                valid = false;
            }
            Some(a) if !a.success => {
                warn!(version = a.version, "Migration {} did not complete", a.description);
                valid = false;
            }
            Some(a) if a.checksum.as_slice() != &*migration.checksum => {
                warn!(version = a.version, "Migration {} changed after it was applied", a.description);
                valid = false;
            }
            Some(_) => {}
        }
    }

    for a in &applied {
        if !MIGRATOR.iter().any(|m| m.version == a.version) {
            warn!(version = a.version, "Database has a migration this build does not know");
            valid = false;
        }
    }

    Ok(valid)
}

/// Highest applied version, or 0 for an unmigrated database.
pub async fn get_migration_version(pool: &DbPool) -> Result<i64> {
    Ok(applied_checksums(pool).await?.keys().next_back().copied().unwrap_or(0))
}

pub async fn list_applied_migrations(pool: &DbPool) -> Result<Vec<MigrationInfo>> {
    let rows = sqlx::query(
        "SELECT version, description, installed_on, success, checksum, execution_time \
         FROM _sqlx_migrations ORDER BY version",
    )
    .fetch_all(pool)
    .await;

    match rows {
        Ok(rows) => Ok(rows
            .into_iter()
            .map(|row| MigrationInfo {
                version: row.get("version"),
                description: row.get("description"),
                installed_on: row.get("installed_on"),
                success: row.get("success"),
                execution_time: row.get("execution_time"),
                checksum: row.get("checksum"),
            })
            .collect()),
        Err(e) if is_missing_table(&e) => Ok(Vec::new()),
        Err(e) => Err(Error::database(e, "Failed to list applied migrations")),
    }
}
