use std::path::PathBuf;

use clap::Subcommand;

use crate::config::DatabaseConfig;
use crate::dataset::{count_unique_keys_in_file, import_file, DEFAULT_DATASET_PATH};
use crate::storage::{create_pool, DistrictRecordRepository};

#[derive(Subcommand)]
pub enum DatasetCommands {
    /// Append every row of a dataset CSV to the store
    Import {
        /// Path to the dataset CSV
        path: PathBuf,
    },

    /// Count total rows versus unique (fin_year, month, district_code) keys
    Dedup {
        /// Path to the dataset CSV
        #[arg(default_value = DEFAULT_DATASET_PATH)]
        path: PathBuf,
    },
}

pub async fn handle_dataset_command(
    command: DatasetCommands,
    database: &DatabaseConfig,
) -> anyhow::Result<()> {
    match command {
        DatasetCommands::Import { path } => {
            let pool = create_pool(database).await?;
            let repository = DistrictRecordRepository::new(pool.clone());

            let summary = import_file(&repository, &path).await?;
            let total = repository.count().await?;
            pool.close().await;

            println!(
                "Imported {} of {} rows from {} ({} records stored)",
                summary.rows_inserted,
                summary.rows_read,
                path.display(),
                total
            );
        }

        DatasetCommands::Dedup { path } => {
            let report = count_unique_keys_in_file(&path)?;
            println!("{}", report);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::get_migration_version;

    const DATASET: &str = "fin_year,month,district_code,district_name,persondays_of_central_liability_so_far\n\
                           2023-2024,Jan,0101,Nagpur,100\n\
                           2023-2024,Jan,0101,Nagpur,100\n\
                           2023-2024,Jan,0202,Amravati,50\n";

    fn file_database(dir: &std::path::Path) -> DatabaseConfig {
        DatabaseConfig {
            url: format!("sqlite://{}", dir.join("cli.db").display()),
            max_connections: 1,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_import_appends_every_row() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("district_data.csv");
        std::fs::write(&csv_path, DATASET).unwrap();
        let database = file_database(dir.path());

        handle_dataset_command(DatasetCommands::Import { path: csv_path.clone() }, &database)
            .await
            .unwrap();
        handle_dataset_command(DatasetCommands::Import { path: csv_path }, &database)
            .await
            .unwrap();

        let pool = create_pool(&database).await.unwrap();
        assert_eq!(DistrictRecordRepository::new(pool.clone()).count().await.unwrap(), 6);
        assert!(get_migration_version(&pool).await.unwrap() > 0);
        pool.close().await;
    }

    #[tokio::test]
    async fn test_import_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let database = file_database(dir.path());

        let result = handle_dataset_command(
            DatasetCommands::Import { path: dir.path().join("absent.csv") },
            &database,
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_dedup_reads_file_without_database() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("district_data.csv");
        std::fs::write(&csv_path, DATASET).unwrap();
        let unusable = DatabaseConfig { url: "postgresql://nowhere".to_string(), ..Default::default() };

        handle_dataset_command(DatasetCommands::Dedup { path: csv_path }, &unusable).await.unwrap();

        let missing =
            handle_dataset_command(DatasetCommands::Dedup { path: dir.path().join("absent.csv") }, &unusable)
                .await;
        assert!(missing.is_err());
    }
}
