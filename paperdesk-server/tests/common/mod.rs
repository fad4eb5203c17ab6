#![allow(dead_code)]

use chrono::{DateTime, FixedOffset};
use paperdesk_core::PaperdeskConfig;
use paperdesk_data_sqlx::{connect, PoolSettings};
use paperdesk_server::{build_router, AppConfig, AppState, MIGRATOR};
use paperdesk_test::TestApp;
use serde_json::{json, Value};
use tempfile::TempDir;

/// A router over a fresh, migrated in-memory database.
pub async fn test_app() -> TestApp {
    app_at("sqlite::memory:").await
}

/// A router over a migrated database file inside `dir`, using the default
/// multi-connection pool. Keep `dir` alive for as long as the app is used.
pub async fn file_app(dir: &TempDir) -> TestApp {
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("papers.db").display());
    app_at(&url).await
}

async fn app_at(url: &str) -> TestApp {
    let pool = connect(url, &PoolSettings::default()).await.expect("pool");
    MIGRATOR.run(&pool).await.expect("migrations");
    let config = PaperdeskConfig::empty()
        .with_typed::<AppConfig>()
        .expect("default config");
    TestApp::new(build_router(AppState::new(pool, config)))
}

pub fn author(name: &str, email: Option<&str>, affiliation: Option<&str>) -> Value {
    json!({ "name": name, "email": email, "affiliation": affiliation })
}

pub fn paper_body(title: &str, venue: &str, year: i64, authors: Vec<Value>) -> Value {
    json!({ "title": title, "publishedIn": venue, "year": year, "authors": authors })
}

/// POST a paper and return its id.
pub async fn create_paper(app: &TestApp, body: Value) -> i64 {
    app.post("/api/papers")
        .json(&body)
        .send()
        .await
        .assert_created()
        .json_at("/id")
}

/// POST an author and return its id.
pub async fn create_author(app: &TestApp, body: Value) -> i64 {
    app.post("/api/authors")
        .json(&body)
        .send()
        .await
        .assert_created()
        .json_at("/id")
}

/// Parse an API timestamp.
pub fn timestamp(value: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(value).unwrap_or_else(|e| panic!("bad timestamp {value}: {e}"))
}
