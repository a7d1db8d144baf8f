//! Shared support for HTTP integration tests.
//!
//! Each `TestApp` owns a private in-memory SQLite database with migrations
//! applied, and drives the router in-process via `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::path::Path;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, Response},
    Router,
};
use district_data::{
    api::{build_router, ApiState},
    config::DatabaseConfig,
    storage::{create_pool, DbPool, DistrictRecordRepository, NewDistrictRecord},
};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

pub struct TestApp {
    pub pool: DbPool,
    router: Router,
}

impl TestApp {
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn repository(&self) -> DistrictRecordRepository {
        DistrictRecordRepository::new(self.pool.clone())
    }

    pub async fn seed(&self, records: &[NewDistrictRecord]) {
        self.repository().insert_many(records).await.expect("seed records");
    }
}

pub async fn test_pool(auto_migrate: bool) -> DbPool {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        idle_timeout_seconds: 0,
        auto_migrate,
        ..Default::default()
    };

    create_pool(&config).await.expect("create in-memory pool")
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_static(None).await
}

pub async fn setup_test_app_with_static(static_dir: Option<&Path>) -> TestApp {
    let pool = test_pool(true).await;
    let router = build_router(ApiState::new(pool.clone()), static_dir);
    TestApp { pool, router }
}

/// An app whose database has no schema, so every query fails.
pub async fn setup_broken_app() -> TestApp {
    let pool = test_pool(false).await;
    let router = build_router(ApiState::new(pool.clone()), None);
    TestApp { pool, router }
}

pub async fn send_request(app: &TestApp, method: Method, path: &str) -> Response<Body> {
    let request = Request::builder().method(method).uri(path).body(Body::empty()).expect("build request");
    app.router().oneshot(request).await.expect("request")
}

pub async fn get(app: &TestApp, path: &str) -> Response<Body> {
    send_request(app, Method::GET, path).await
}

pub async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

pub async fn read_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

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

/// A small multi-district, multi-month fixture in insertion order.
pub fn sample_records() -> Vec<NewDistrictRecord> {
    vec![
        record("1801", "Nagpur", "2023-2024", "Apr", 1200.0),
        record("1802", "Wardha", "2023-2024", "Apr", 400.0),
        record("1803", "Bhandara", "2023-2024", "Apr", 650.0),
        record("1801", "Nagpur", "2023-2024", "May", 2500.0),
        record("1802", "Wardha", "2023-2024", "May", 820.5),
        record("1801", "Nagpur", "2023-2024", "Jun", 3100.0),
        record("1803", "Bhandara", "2023-2024", "May", 1300.0),
    ]
}
