use district_data::{
    api::{start_api_server, ApiState},
    observability::{init_observability, log_config_info},
    storage::create_pool,
    Config, Result, APP_NAME, VERSION,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (optional - won't fail if missing)
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let config = Config::from_env()?;
    init_observability(&config.observability)?;

    info!(app_name = APP_NAME, version = VERSION, "Starting district data service");
    log_config_info(&config);

    let pool = create_pool(&config.database).await?;
    let state = ApiState::new(pool.clone());

    if let Err(e) = start_api_server(config.api.clone(), state).await {
        error!(error = %e, "API server terminated with error");
        pool.close().await;
        return Err(e);
    }

    pool.close().await;
    info!("District data service shutdown completed");
    Ok(())
}
