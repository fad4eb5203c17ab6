use axum::routing::get;
use axum::Router;
use paperdesk_core::prelude::*;

use crate::models::{Paper, PaperInput, PaperPage};
use crate::services::PaperService;
use crate::state::AppState;
use crate::validation::{paper_query, validate_paper};

pub const PAPER_NOT_FOUND: &str = "Paper not found";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/papers", get(list).post(create))
        .route("/papers/{id}", get(get_by_id).put(update).delete(delete))
}

#[tracing::instrument(skip(service))]
async fn list(State(service): State<PaperService>, RawQuery(query): RawQuery) -> JsonResult<PaperPage> {
    let query = paper_query(query.as_deref())?;
    let page = service.list(&query.filter, query.page).await?;
    Ok(Json(page.into()))
}

#[tracing::instrument(skip(service))]
async fn get_by_id(State(service): State<PaperService>, Path(id): Path<String>) -> JsonResult<Paper> {
    let id = parse_id(&id)?;
    match service.get(id).await? {
        Some(paper) => Ok(Json(paper)),
        None => Err(HttpError::NotFound(PAPER_NOT_FOUND.into())),
    }
}

#[tracing::instrument(skip_all)]
async fn create(
    State(service): State<PaperService>,
    payload: Result<Json<PaperInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Paper>)> {
    let input = json_body(payload)?;
    let new = validate_paper(&input)?;
    let paper = service.create(new).await?;
    Ok((StatusCode::CREATED, Json(paper)))
}

#[tracing::instrument(skip(service, payload))]
async fn update(
    State(service): State<PaperService>,
    Path(id): Path<String>,
    payload: Result<Json<PaperInput>, JsonRejection>,
) -> JsonResult<Paper> {
    let id = parse_id(&id)?;
    let input = json_body(payload)?;
    let new = validate_paper(&input)?;
    match service.update(id, new).await? {
        Some(paper) => Ok(Json(paper)),
        None => Err(HttpError::NotFound(PAPER_NOT_FOUND.into())),
    }
}

#[tracing::instrument(skip(service))]
async fn delete(State(service): State<PaperService>, Path(id): Path<String>) -> StatusResult {
    let id = parse_id(&id)?;
    if service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(HttpError::NotFound(PAPER_NOT_FOUND.into()))
    }
}
