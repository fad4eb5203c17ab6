//! # paperdesk-server
//!
//! Paper and author management over HTTP, backed by SQLite.
//!
//! | Path | Handler module |
//! |------|----------------|
//! | `/api/papers`, `/api/papers/{id}` | [`controllers::paper_controller`] |
//! | `/api/authors`, `/api/authors/{id}` | [`controllers::author_controller`] |
//! | `/health`, `/health/live` | [`paperdesk_core::health`] |

pub mod app;
pub mod config;
pub mod controllers;
pub mod models;
pub mod services;
pub mod state;
pub mod validation;

pub use app::{build_router, run, MIGRATOR};
pub use config::AppConfig;
pub use state::AppState;
