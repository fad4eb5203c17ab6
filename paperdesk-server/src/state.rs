use axum::extract::FromRef;
use paperdesk_core::PaperdeskConfig;
use paperdesk_data_sqlx::HasPool;
use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::services::{AuthorService, PaperService};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: PaperdeskConfig<AppConfig>,
    pub paper_service: PaperService,
    pub author_service: AuthorService,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: PaperdeskConfig<AppConfig>) -> Self {
        Self {
            paper_service: PaperService::new(pool.clone()),
            author_service: AuthorService::new(pool.clone()),
            pool,
            config,
        }
    }
}

impl HasPool for AppState {
    fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl FromRef<AppState> for PaperService {
    fn from_ref(state: &AppState) -> Self {
        state.paper_service.clone()
    }
}

impl FromRef<AppState> for AuthorService {
    fn from_ref(state: &AppState) -> Self {
        state.author_service.clone()
    }
}
