use std::marker::PhantomData;

use paperdesk_data::{Entity, QueryBuilder, SqlValue};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Sqlite, SqliteConnection};

use crate::bind::BindValues;
use crate::error::{SqlxErrorExt, SqlxResult};

/// Entity-aware query helper for SQLite.
///
/// Holds no connection; every read takes one explicitly so it can run inside
/// a [`Tx`](crate::Tx).
///
/// ```ignore
/// let repo = SqlxRepository::<PaperRecord>::new();
/// let query = repo.query().where_eq("year", 2020);
/// let total = repo.count(tx.conn(), &query).await?;
/// ```
pub struct SqlxRepository<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> SqlxRepository<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for SqlxRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SqlxRepository<T>
where
    T: Entity + for<'r> FromRow<'r, SqliteRow>,
{
    /// A `QueryBuilder` pre-configured for this entity's table.
    pub fn query(&self) -> QueryBuilder {
        QueryBuilder::new(T::table_name())
    }

    /// Number of rows matching the builder's conditions.
    pub async fn count(&self, conn: &mut SqliteConnection, builder: &QueryBuilder) -> SqlxResult<u64> {
        let (sql, params) = builder.build_count()?;
        tracing::trace!(%sql, "count");
        let total = sqlx::query_scalar::<Sqlite, i64>(&sql)
            .bind_values(params)
            .fetch_one(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        Ok(total.max(0) as u64)
    }

    /// Every row matching the builder, selecting the entity's columns.
    pub async fn fetch_all(&self, conn: &mut SqliteConnection, builder: &QueryBuilder) -> SqlxResult<Vec<T>> {
        let (sql, params) = builder.build_select(T::columns())?;
        tracing::trace!(%sql, "select");
        sqlx::query_as::<Sqlite, T>(&sql)
            .bind_values(params)
            .fetch_all(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_data_error)
    }

    pub async fn find_by_id(
        &self,
        conn: &mut SqliteConnection,
        id: impl Into<SqlValue>,
    ) -> SqlxResult<Option<T>> {
        let builder = self.query().where_eq(T::id_column(), id);
        let (sql, params) = builder.build_select(T::columns())?;
        sqlx::query_as::<Sqlite, T>(&sql)
            .bind_values(params)
            .fetch_optional(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_data_error)
    }
}

impl<T> Clone for SqlxRepository<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}
