use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::api::routes::ApiState;
use crate::storage::{check_connection, get_pool_stats};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
    pub pool_size: u32,
    pub pool_idle: usize,
    pub pool_active: u32,
}

/// `GET /health`: liveness plus a database round trip.
pub async fn health_handler(State(state): State<ApiState>) -> (StatusCode, Json<HealthResponse>) {
    let pool = state.records.repository().pool();
    let stats = get_pool_stats(pool);

    let (status, code, database) = match check_connection(pool).await {
        Ok(()) => ("healthy", StatusCode::OK, "ok"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check database probe failed");
            ("unhealthy", StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    (
        code,
        Json(HealthResponse {
            status,
            database,
            version: crate::VERSION,
            pool_size: stats.size,
            pool_idle: stats.idle,
            pool_active: stats.active(),
        }),
    )
}
