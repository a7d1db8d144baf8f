//! # Command Line Interface
//!
//! Administrative commands: schema migrations, dataset import, and the
//! dataset dedup check.

pub mod dataset;

use crate::config::DatabaseConfig;
use crate::storage::{
    create_pool, get_migration_version, list_applied_migrations, run_migrations,
    validate_migrations,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "district-data-cli")]
#[command(about = "District data service tooling")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database URL override
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Database management commands
    Database {
        #[command(subcommand)]
        command: DatabaseCommands,
    },

    /// Dataset file commands
    Dataset {
        #[command(subcommand)]
        command: dataset::DatasetCommands,
    },
}

#[derive(Subcommand)]
pub enum DatabaseCommands {
    /// Run pending migrations
    Migrate,

    /// Show migration status
    Status,

    /// List all applied migrations
    List,
}

/// Run CLI commands
pub async fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    initialise_logging(cli.verbose);

    let mut database = DatabaseConfig::from_env()?;
    if let Some(url) = cli.database_url {
        database.url = url;
    }

    match cli.command {
        Commands::Database { command } => handle_database_command(command, &database).await?,
        Commands::Dataset { command } => dataset::handle_dataset_command(command, &database).await?,
    }

    Ok(())
}

fn initialise_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_env_filter(filter).with_writer(std::io::stderr).finish(),
    )
    .is_err()
    {
        // Subscriber already set elsewhere (e.g. integration tests); ignore.
    }
}

/// Handle database management commands
async fn handle_database_command(
    command: DatabaseCommands,
    config: &DatabaseConfig,
) -> anyhow::Result<()> {
    let config = DatabaseConfig { auto_migrate: false, ..config.clone() };
    let pool = create_pool(&config).await?;

    match command {
        DatabaseCommands::Migrate => {
            let applied = run_migrations(&pool).await?;
            if applied == 0 {
                println!("Database schema is already up to date");
            } else {
                println!("Applied {} migration(s)", applied);
            }
        }

        DatabaseCommands::Status => {
            let version = get_migration_version(&pool).await?;
            if validate_migrations(&pool).await? {
                println!("Database schema is up to date (version {})", version);
            } else {
                println!("Database schema has pending migrations (current version {})", version);
            }
        }

        DatabaseCommands::List => {
            let migrations = list_applied_migrations(&pool).await?;
            if migrations.is_empty() {
                println!("No migrations applied");
            } else {
                println!("{:<16} {:<48} {:>10}  INSTALLED", "VERSION", "DESCRIPTION", "TIME (ms)");
                for migration in migrations {
                    println!(
                        "{:<16} {:<48} {:>10}  {}",
                        migration.version,
                        migration.description,
                        migration.execution_time,
                        migration.installed_on.format("%Y-%m-%d %H:%M:%S")
                    );
                }
            }
        }
    }

    pool.close().await;
    Ok(())
}
