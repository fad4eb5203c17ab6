use axum::routing::get;
use axum::Router;
use paperdesk_core::prelude::*;

use crate::models::{Author, AuthorInput, AuthorPage};
use crate::services::AuthorService;
use crate::state::AppState;
use crate::validation::{author_query, validate_author};

pub const AUTHOR_NOT_FOUND: &str = "Author not found";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/authors", get(list).post(create))
        .route("/authors/{id}", get(get_by_id).put(update).delete(delete))
}

#[tracing::instrument(skip(service))]
async fn list(State(service): State<AuthorService>, RawQuery(query): RawQuery) -> JsonResult<AuthorPage> {
    let query = author_query(query.as_deref())?;
    let page = service.list(&query.filter, query.page).await?;
    Ok(Json(page.into()))
}

#[tracing::instrument(skip(service))]
async fn get_by_id(State(service): State<AuthorService>, Path(id): Path<String>) -> JsonResult<Author> {
    let id = parse_id(&id)?;
    service
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| HttpError::NotFound(AUTHOR_NOT_FOUND.into()))
}

#[tracing::instrument(skip_all)]
async fn create(
    State(service): State<AuthorService>,
    payload: Result<Json<AuthorInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Author>)> {
    let new = validate_author(&json_body(payload)?)?;
    let author = service.create(new).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

#[tracing::instrument(skip(service, payload))]
async fn update(
    State(service): State<AuthorService>,
    Path(id): Path<String>,
    payload: Result<Json<AuthorInput>, JsonRejection>,
) -> JsonResult<Author> {
    let id = parse_id(&id)?;
    let new = validate_author(&json_body(payload)?)?;
    service
        .update(id, new)
        .await?
        .map(Json)
        .ok_or_else(|| HttpError::NotFound(AUTHOR_NOT_FOUND.into()))
}

/// 400 Constraint Error when the author is the only author of some paper.
#[tracing::instrument(skip(service))]
async fn delete(State(service): State<AuthorService>, Path(id): Path<String>) -> StatusResult {
    let id = parse_id(&id)?;
    if service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(HttpError::NotFound(AUTHOR_NOT_FOUND.into()))
    }
}
