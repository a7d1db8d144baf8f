//! # SQLite Pool
//!
//! Opens the district database, creating the file and its directory on first
//! use, and optionally applies the embedded migrations.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Pool, Sqlite,
};

use crate::config::DatabaseConfig;
use crate::errors::{Error, Result};

pub type DbPool = Pool<Sqlite>;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open the pool described by `config`.
///
/// With `auto_migrate` set, pending migrations run before the pool is
/// returned.
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool> {
    check_pool_bounds(config)?;

    let connect_options = connect_options(&config.url)?;
    if let Some(dir) = database_dir(connect_options.get_filename()) {
        std::fs::create_dir_all(&dir).map_err(|e| {
            Error::io(e, format!("Failed to create database directory {}", dir.display()))
        })?;
    }

    let pool = pool_options(config).connect_with(connect_options).await.map_err(|e| {
        tracing::error!(error = %e, url = %config.url, "Failed to open district database");
        Error::database(e, format!("Failed to connect to database: {}", config.url))
    })?;

    tracing::info!(
        url = %config.url,
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        idle_timeout_secs = config.idle_timeout().map(|d| d.as_secs()),
        "District database opened"
    );

    if config.auto_migrate {
        crate::storage::migrations::run_migrations(&pool).await?;
    }

    Ok(pool)
}

fn check_pool_bounds(config: &DatabaseConfig) -> Result<()> {
    if !config.is_sqlite() {
        return Err(Error::config(format!(
            "Unsupported database URL '{}': expected a sqlite: URL",
            config.url
        )));
    }
    if config.max_connections == 0 {
        return Err(Error::config("max_connections must be at least 1"));
    }
    if config.min_connections > config.max_connections {
        return Err(Error::config("min_connections cannot exceed max_connections"));
    }
    Ok(())
}

fn connect_options(url: &str) -> Result<SqliteConnectOptions> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(|e| Error::database(e, format!("Invalid SQLite URL: {}", url)))?;

    Ok(options.create_if_missing(true).busy_timeout(BUSY_TIMEOUT).journal_mode(SqliteJournalMode::Wal))
}

fn pool_options(config: &DatabaseConfig) -> SqlitePoolOptions {
    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.connect_timeout())
        .idle_timeout(config.idle_timeout())
}

/// Directory that must exist for a file-backed database; `None` for
/// in-memory databases and bare file names.
fn database_dir(filename: &Path) -> Option<PathBuf> {
    if filename.as_os_str().is_empty() || filename == Path::new(":memory:") {
        return None;
    }
    filename.parent().filter(|dir| !dir.as_os_str().is_empty()).map(Path::to_path_buf)
}

/// Connection counts, as reported by `/health`.
pub fn get_pool_stats(pool: &DbPool) -> PoolStats {
    PoolStats { size: pool.size(), idle: pool.num_idle() }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    pub size: u32,
    pub idle: usize,
}

impl PoolStats {
    /// Connections currently checked out.
    pub fn active(&self) -> u32 {
        self.size.saturating_sub(self.idle as u32)
    }
}
