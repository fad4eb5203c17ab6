use chrono::Utc;
use paperdesk_data::{DataError, Page, PageRequest};
use paperdesk_data_sqlx::{SqlxErrorExt, SqlxRepository, SqlxResult, Tx};
use sqlx::{Sqlite, SqliteConnection, SqlitePool};

use super::links;
use crate::models::{Author, AuthorFilter, AuthorRecord, NewAuthor};

pub const SOLE_AUTHOR_MESSAGE: &str =
    "Cannot delete author: they are the only author of one or more papers";

#[derive(Clone)]
pub struct AuthorService {
    pool: SqlitePool,
    authors: SqlxRepository<AuthorRecord>,
}

impl AuthorService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            authors: SqlxRepository::new(),
            pool,
        }
    }

    /// Always inserts a new row; no dedup on this path.
    pub async fn create(&self, new: NewAuthor) -> SqlxResult<Author> {
        let mut conn = self.pool.acquire().await.map_err(SqlxErrorExt::into_data_error)?;
        let record = links::insert_author(&mut *conn, &new, Utc::now()).await?;
        tracing::info!(author_id = record.id, "Author created");
        Ok(Author {
            record,
            papers: Vec::new(),
        })
    }

    pub async fn list(&self, filter: &AuthorFilter, page: PageRequest) -> SqlxResult<Page<Author>> {
        let query = self
            .authors
            .query()
            .where_contains_ci_opt("name", filter.name.as_deref())
            .where_contains_ci_opt("affiliation", filter.affiliation.as_deref());

        let mut tx = Tx::begin(&self.pool).await?;
        let total = self.authors.count(tx.conn(), &query).await?;
        let query = query.order_by("id", true).limit(page.limit).offset(page.offset);
        let records = self.authors.fetch_all(tx.conn(), &query).await?;

        let ids: Vec<i64> = records.iter().map(|a| a.id).collect();
        let mut papers = links::papers_by_author(tx.conn(), &ids).await?;
        tx.commit().await?;

        let authors = records
            .into_iter()
            .map(|record| Author {
                papers: papers.remove(&record.id).unwrap_or_default(),
                record,
            })
            .collect();
        Ok(Page::new(authors, &page, total))
    }

    pub async fn get(&self, id: i64) -> SqlxResult<Option<Author>> {
        let mut conn = self.pool.acquire().await.map_err(SqlxErrorExt::into_data_error)?;
        match self.authors.find_by_id(&mut *conn, id).await? {
            Some(record) => Ok(Some(self.load(&mut *conn, record).await?)),
            None => Ok(None),
        }
    }

    pub async fn update(&self, id: i64, new: NewAuthor) -> SqlxResult<Option<Author>> {
        let mut tx = Tx::begin_immediate(&self.pool).await?;
        let record = sqlx::query_as::<Sqlite, AuthorRecord>(
            "UPDATE authors SET name = ?, email = ?, affiliation = ?, updated_at = ? WHERE id = ? \
             RETURNING id, name, email, affiliation, created_at, updated_at",
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.affiliation)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(tx.conn())
        .await
        .map_err(SqlxErrorExt::into_data_error)?;

        let Some(record) = record else {
            return Ok(None);
        };
        let author = self.load(tx.conn(), record).await?;
        tx.commit().await?;
        tracing::info!(author_id = id, "Author updated");
        Ok(Some(author))
    }

    /// Delete an author unless some paper would be left without authors.
    ///
    /// Returns `false` if the author does not exist and
    /// [`DataError::Constraint`] when the guard refuses.
    pub async fn delete(&self, id: i64) -> SqlxResult<bool> {
        let mut tx = Tx::begin_immediate(&self.pool).await?;
        if self.authors.find_by_id(tx.conn(), id).await?.is_none() {
            return Ok(false);
        }

        let sole_authored = sqlx::query_scalar::<Sqlite, i64>(
            "SELECT COUNT(*) FROM paper_authors pa WHERE pa.author_id = ? \
             AND (SELECT COUNT(*) FROM paper_authors other WHERE other.paper_id = pa.paper_id) = 1",
        )
        .bind(id)
        .fetch_one(tx.conn())
        .await
        .map_err(SqlxErrorExt::into_data_error)?;
        if sole_authored > 0 {
            tracing::info!(author_id = id, papers = sole_authored, "Author deletion refused");
            return Err(DataError::Constraint(SOLE_AUTHOR_MESSAGE.to_string()));
        }

        sqlx::query::<Sqlite>("DELETE FROM authors WHERE id = ?")
            .bind(id)
            .execute(tx.conn())
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        tx.commit().await?;
        tracing::info!(author_id = id, "Author deleted");
        Ok(true)
    }

    async fn load(&self, conn: &mut SqliteConnection, record: AuthorRecord) -> SqlxResult<Author> {
        let mut papers = links::papers_by_author(conn, &[record.id]).await?;
        Ok(Author {
            papers: papers.remove(&record.id).unwrap_or_default(),
            record,
        })
    }
}
