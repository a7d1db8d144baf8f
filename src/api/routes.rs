use std::path::Path;
use std::sync::Arc;

use axum::{http::Uri, middleware, routing::get, Router};
use tower_http::services::{ServeDir, ServeFile};

use crate::observability::trace_http_requests;
use crate::services::RecordQueryService;
use crate::storage::{DbPool, DistrictRecordRepository};

use super::{
    error::ApiError,
    handlers::{
        all_district_records_handler, district_records_handler, health_handler,
        list_districts_handler, map_data_handler, missing_district_code_handler,
    },
};

#[derive(Clone)]
pub struct ApiState {
    pub records: Arc<RecordQueryService>,
}

impl ApiState {
    pub fn new(pool: DbPool) -> Self {
        let repository = Arc::new(DistrictRecordRepository::new(pool));
        Self { records: Arc::new(RecordQueryService::new(repository)) }
    }
}

/// Build the application router.
///
/// With a `static_dir`, every path that is not an API route is served from
/// that directory, falling back to its `index.html` for client-side routes.
pub fn build_router(state: ApiState, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/districts", get(list_districts_handler))
        .route("/district-records", get(missing_district_code_handler))
        .route("/district-records/", get(missing_district_code_handler))
        .route("/district-records/{district_code}", get(district_records_handler))
        .route("/map-data", get(map_data_handler))
        .route("/all-district-records", get(all_district_records_handler))
        .route("/health", get(health_handler))
        .with_state(state);

    let router = match static_dir {
        Some(dir) => {
            let index = dir.join("index.html");
            api.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)))
        }
        None => api.fallback(not_found_handler),
    };

    router.layer(middleware::from_fn(trace_http_requests))
}

async fn not_found_handler(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}
