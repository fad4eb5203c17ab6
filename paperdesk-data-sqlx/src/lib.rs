//! # paperdesk-data-sqlx
//!
//! SQLite backend for the paperdesk data layer.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`SqlxRepository`] | Entity-aware wrapper holding a `SqlitePool`, running `QueryBuilder` queries |
//! | [`Tx`] | Transaction wrapper with `DataError` results; rolls back on drop |
//! | [`HasPool`] | Trait for application states that contain a pool |
//! | [`SqlxErrorExt`] | `sqlx::Error` → `DataError` (`.into_data_error()`) |
//! | [`BindValues`] | Binds `QueryBuilder` values onto sqlx queries |
//! | [`connect`] | Pool construction from a URL |

pub mod bind;
pub mod error;
pub mod pool;
pub mod repository;
pub mod tx;

pub use bind::BindValues;
pub use error::{SqlxErrorExt, SqlxResult};
pub use pool::{connect, PoolSettings};
pub use repository::SqlxRepository;
pub use tx::{HasPool, Tx};

/// Re-exports of the most commonly used types from both `paperdesk-data` and this crate.
pub mod prelude {
    pub use crate::{HasPool, SqlxErrorExt, SqlxRepository, SqlxResult, Tx};
    pub use paperdesk_data::prelude::*;
}
