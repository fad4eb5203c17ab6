use axum::Router;
use paperdesk_core::health::BoxFuture;
use paperdesk_core::layers::not_found_fallback;
use paperdesk_core::{
    catch_panic_layer, default_cors, default_trace, HealthIndicator, HealthRegistry, HealthStatus,
    PaperdeskConfig,
};
use paperdesk_data_sqlx::{connect, HasPool};
use sqlx::migrate::Migrator;
use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::controllers;
use crate::state::AppState;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Database reachability check for `/health`.
pub struct DbHealth {
    pool: SqlitePool,
}

impl DbHealth {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl HealthIndicator for DbHealth {
    fn name(&self) -> &str {
        "database"
    }

    fn check(&self) -> BoxFuture<'_, HealthStatus> {
        Box::pin(async move {
            match sqlx::query("SELECT 1").execute(&self.pool).await {
                Ok(_) => HealthStatus::Up,
                Err(e) => HealthStatus::Down(e.to_string()),
            }
        })
    }
}

/// The full HTTP surface: `/api`, health endpoints, the JSON 404 fallback and
/// the tower layers.
pub fn build_router(state: AppState) -> Router {
    let health = HealthRegistry::builder()
        .check(DbHealth::new(state.pool().clone()))
        .build();

    Router::new()
        .nest("/api", controllers::api_routes())
        .with_state(state)
        .merge(health.into_router())
        .fallback(not_found_fallback)
        .layer(catch_panic_layer())
        .layer(default_trace())
        .layer(default_cors())
}

/// Connect, migrate and serve until Ctrl-C or SIGTERM.
pub async fn run(config: PaperdeskConfig<AppConfig>) -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect(&config.database.url, &config.database.pool_settings()).await?;
    MIGRATOR.run(&pool).await?;
    tracing::info!("Database migrations applied");

    let addr = config.bind_address();
    let router = build_router(AppState::new(pool.clone(), config));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "paperdesk listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
