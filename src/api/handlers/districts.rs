use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use crate::api::{error::ApiError, routes::ApiState};
use crate::storage::{DistrictRecord, DistrictSummary};

/// `GET /districts`
pub async fn list_districts_handler(
    State(state): State<ApiState>,
) -> Result<Json<Vec<DistrictSummary>>, ApiError> {
    let districts = state.records.list_districts().await?;
    Ok(Json(districts))
}

/// `GET /district-records/{district_code}`
///
/// An undecodable code (e.g. invalid UTF-8) is a 400 with the usual JSON body.
pub async fn district_records_handler(
    State(state): State<ApiState>,
    district_code: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<DistrictRecord>>, ApiError> {
    let Path(district_code) =
        district_code.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let records = state.records.records_for_district(&district_code).await?;
    Ok(Json(records))
}

/// `GET /district-records` with no code in the path.
pub async fn missing_district_code_handler() -> ApiError {
    ApiError::bad_request("District code is required")
}

/// `GET /map-data`: the latest record of every district.
pub async fn map_data_handler(
    State(state): State<ApiState>,
) -> Result<Json<Vec<DistrictRecord>>, ApiError> {
    let records = state.records.latest_per_district().await?;
    Ok(Json(records))
}

/// `GET /all-district-records`
pub async fn all_district_records_handler(
    State(state): State<ApiState>,
) -> Result<Json<Vec<DistrictRecord>>, ApiError> {
    let records = state.records.all_records().await?;
    Ok(Json(records))
}
