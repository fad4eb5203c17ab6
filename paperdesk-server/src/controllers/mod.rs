pub mod author_controller;
pub mod paper_controller;

use axum::Router;

use crate::state::AppState;

/// Every `/api` resource route.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(paper_controller::routes())
        .merge(author_controller::routes())
}
