//! Transaction wrapper.
//!
//! A [`Tx`] must be committed explicitly; dropping it rolls back.

use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};

use crate::error::{SqlxErrorExt, SqlxResult};

/// Trait for application states that contain a database pool.
pub trait HasPool {
    fn pool(&self) -> &SqlitePool;
}

impl HasPool for SqlitePool {
    fn pool(&self) -> &SqlitePool {
        self
    }
}

/// A SQLite transaction whose errors surface as `DataError`.
///
/// ```ignore
/// let mut tx = Tx::begin_immediate(&pool).await?;
/// sqlx::query("DELETE FROM papers WHERE id = ?")
///     .bind(id)
///     .execute(tx.conn())
///     .await
///     .map_err(SqlxErrorExt::into_data_error)?;
/// tx.commit().await?;
/// ```
pub struct Tx<'a>(Transaction<'a, Sqlite>);

impl Tx<'static> {
    /// Deferred `BEGIN`. For read-only work.
    pub async fn begin(pool: &SqlitePool) -> SqlxResult<Self> {
        let tx = pool.begin().await.map_err(SqlxErrorExt::into_data_error)?;
        Ok(Tx(tx))
    }

    /// `BEGIN IMMEDIATE`: takes the write lock up front, so a transaction that
    /// reads before writing waits on the busy timeout instead of failing with
    /// `SQLITE_BUSY` when another writer is active.
    pub async fn begin_immediate(pool: &SqlitePool) -> SqlxResult<Self> {
        let tx = pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        Ok(Tx(tx))
    }
}

impl<'a> Tx<'a> {
    /// The connection the transaction runs on.
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut *self.0
    }

    pub async fn commit(self) -> SqlxResult<()> {
        self.0.commit().await.map_err(SqlxErrorExt::into_data_error)
    }
}
