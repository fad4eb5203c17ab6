//! # paperdesk-core
//!
//! Runtime pieces shared by the paperdesk crates: the [`HttpError`] type and
//! its JSON bodies, ordered [`ValidationErrors`], path/query parameter
//! parsing, layered YAML + environment configuration, tracing and tower
//! layers, and health checks.

pub mod config;
pub mod error;
pub mod health;
pub mod layers;
pub mod params;
pub mod types;
pub mod validation;

pub use config::{ConfigError, ConfigProperties, ConfigValue, PaperdeskConfig};
pub use error::HttpError;
pub use health::{HealthIndicator, HealthRegistry, HealthStatus};
pub use layers::{catch_panic_layer, default_cors, default_trace, init_tracing, LogFormat};
pub use params::{json_body, parse_id, ParamError, QueryParams};
pub use types::{ApiResult, JsonResult, StatusResult};
pub use validation::ValidationErrors;

pub mod prelude {
    //! Re-exports of the most commonly used types.
    pub use crate::{
        json_body, parse_id, ApiResult, HttpError, JsonResult, QueryParams, StatusResult,
        ValidationErrors,
    };
    pub use axum::extract::rejection::JsonRejection;
    pub use axum::extract::{Path, RawQuery, State};
    pub use axum::http::StatusCode;
    pub use axum::Json;
}
