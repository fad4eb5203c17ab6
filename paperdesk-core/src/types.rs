//! Handler return type aliases.
//!
//! ```ignore
//! async fn get_paper(...) -> JsonResult<Paper> { ... }
//! async fn delete_paper(...) -> StatusResult { Ok(StatusCode::NO_CONTENT) }
//! ```

use axum::http::StatusCode;
use axum::Json;

use crate::error::HttpError;

/// Any response type with [`HttpError`].
pub type ApiResult<T> = Result<T, HttpError>;

/// `Result<Json<T>, HttpError>`.
pub type JsonResult<T> = Result<Json<T>, HttpError>;

/// Status-only responses such as DELETE.
pub type StatusResult = Result<StatusCode, HttpError>;
