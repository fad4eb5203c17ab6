//! Health checks.
//!
//! | Path               | Description                                |
//! |--------------------|--------------------------------------------|
//! | `GET /health`      | Aggregated status, 200 if UP, 503 if DOWN  |
//! | `GET /health/live` | Liveness probe, always 200                 |
//!
//! ```ignore
//! struct DbHealth { pool: SqlitePool }
//!
//! impl HealthIndicator for DbHealth {
//!     fn name(&self) -> &str { "db" }
//!     fn check(&self) -> BoxFuture<'_, HealthStatus> {
//!         Box::pin(async move { /* SELECT 1 */ HealthStatus::Up })
//!     }
//! }
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Result of a single health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Up,
    Down(String),
}

/// A named health indicator.
pub trait HealthIndicator: Send + Sync + 'static {
    fn name(&self) -> &str;
    fn check(&self) -> BoxFuture<'_, HealthStatus>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheck {
    pub name: String,
    pub status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub duration_ms: u64,
}

/// Aggregated health response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: CheckStatus,
    pub checks: Vec<HealthCheck>,
    pub uptime_seconds: u64,
}

/// Registered indicators plus the process start time.
#[derive(Clone)]
pub struct HealthRegistry {
    checks: Arc<Vec<Box<dyn HealthIndicator>>>,
    started: Instant,
}

impl HealthRegistry {
    pub fn builder() -> HealthBuilder {
        HealthBuilder { checks: Vec::new() }
    }

    /// Run every indicator in registration order.
    pub async fn aggregate(&self) -> HealthResponse {
        let mut checks = Vec::with_capacity(self.checks.len());
        for indicator in self.checks.iter() {
            let start = Instant::now();
            let status = indicator.check().await;
            let duration_ms = start.elapsed().as_millis() as u64;
            let (status, reason) = match status {
                HealthStatus::Up => (CheckStatus::Up, None),
                HealthStatus::Down(reason) => {
                    tracing::warn!(check = indicator.name(), %reason, "Health check failed");
                    (CheckStatus::Down, Some(reason))
                }
            };
            checks.push(HealthCheck {
                name: indicator.name().to_string(),
                status,
                reason,
                duration_ms,
            });
        }

        let status = if checks.iter().all(|c| c.status == CheckStatus::Up) {
            CheckStatus::Up
        } else {
            CheckStatus::Down
        };
        HealthResponse {
            status,
            checks,
            uptime_seconds: self.started.elapsed().as_secs(),
        }
    }

    /// Router serving `/health` and `/health/live`.
    pub fn into_router(self) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/health/live", get(liveness_handler))
            .with_state(self)
    }
}

pub struct HealthBuilder {
    checks: Vec<Box<dyn HealthIndicator>>,
}

impl HealthBuilder {
    pub fn check<H: HealthIndicator>(mut self, indicator: H) -> Self {
        self.checks.push(Box::new(indicator));
        self
    }

    pub fn build(self) -> HealthRegistry {
        HealthRegistry {
            checks: Arc::new(self.checks),
            started: Instant::now(),
        }
    }
}

async fn health_handler(State(registry): State<HealthRegistry>) -> impl IntoResponse {
    let response = registry.aggregate().await;
    let status = match response.status {
        CheckStatus::Up => StatusCode::OK,
        CheckStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(response))
}

async fn liveness_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
