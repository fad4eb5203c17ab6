use chrono::Utc;
use paperdesk_data::{Page, PageRequest};
use paperdesk_data_sqlx::{SqlxErrorExt, SqlxRepository, SqlxResult, Tx};
use sqlx::{Sqlite, SqliteConnection, SqlitePool};

use super::links;
use crate::models::{NewPaper, Paper, PaperFilter, PaperRecord};

#[derive(Clone)]
pub struct PaperService {
    pool: SqlitePool,
    papers: SqlxRepository<PaperRecord>,
}

impl PaperService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            papers: SqlxRepository::new(),
            pool,
        }
    }

    /// Insert a paper, resolving each author through the dedup rule.
    pub async fn create(&self, new: NewPaper) -> SqlxResult<Paper> {
        let now = Utc::now();
        let mut tx = Tx::begin_immediate(&self.pool).await?;

        let author_ids = links::resolve_authors(tx.conn(), &new.authors, now).await?;
        let record = sqlx::query_as::<Sqlite, PaperRecord>(
            "INSERT INTO papers (title, published_in, year, created_at, updated_at) VALUES (?, ?, ?, ?, ?) \
             RETURNING id, title, published_in, year, created_at, updated_at",
        )
        .bind(&new.title)
        .bind(&new.published_in)
        .bind(new.year)
        .bind(now)
        .bind(now)
        .fetch_one(tx.conn())
        .await
        .map_err(SqlxErrorExt::into_data_error)?;
        links::replace_paper_authors(tx.conn(), record.id, &author_ids).await?;

        let paper = self.load(tx.conn(), record).await?;
        tx.commit().await?;
        tracing::info!(paper_id = paper.record.id, authors = paper.authors.len(), "Paper created");
        Ok(paper)
    }

    /// One page of papers matching `filter`, ascending by id, with the total match count.
    pub async fn list(&self, filter: &PaperFilter, page: PageRequest) -> SqlxResult<Page<Paper>> {
        let query = self
            .papers
            .query()
            .where_eq_opt("year", filter.year)
            .where_contains_ci_opt("published_in", filter.published_in.as_deref());

        let mut tx = Tx::begin(&self.pool).await?;
        let total = self.papers.count(tx.conn(), &query).await?;
        let query = query.order_by("id", true).limit(page.limit).offset(page.offset);
        let records = self.papers.fetch_all(tx.conn(), &query).await?;

        let ids: Vec<i64> = records.iter().map(|p| p.id).collect();
        let mut authors = links::authors_by_paper(tx.conn(), &ids).await?;
        tx.commit().await?;

        let papers = records
            .into_iter()
            .map(|record| Paper {
                authors: authors.remove(&record.id).unwrap_or_default(),
                record,
            })
            .collect();
        Ok(Page::new(papers, &page, total))
    }

    pub async fn get(&self, id: i64) -> SqlxResult<Option<Paper>> {
        let mut conn = self.pool.acquire().await.map_err(SqlxErrorExt::into_data_error)?;
        match self.papers.find_by_id(&mut *conn, id).await? {
            Some(record) => Ok(Some(self.load(&mut *conn, record).await?)),
            None => Ok(None),
        }
    }

    /// Replace the editable fields and the whole author set. `None` if the paper is absent.
    pub async fn update(&self, id: i64, new: NewPaper) -> SqlxResult<Option<Paper>> {
        let now = Utc::now();
        let mut tx = Tx::begin_immediate(&self.pool).await?;
        if self.papers.find_by_id(tx.conn(), id).await?.is_none() {
            return Ok(None);
        }

        let author_ids = links::resolve_authors(tx.conn(), &new.authors, now).await?;
        links::replace_paper_authors(tx.conn(), id, &author_ids).await?;
        let record = sqlx::query_as::<Sqlite, PaperRecord>(
            "UPDATE papers SET title = ?, published_in = ?, year = ?, updated_at = ? WHERE id = ? \
             RETURNING id, title, published_in, year, created_at, updated_at",
        )
        .bind(&new.title)
        .bind(&new.published_in)
        .bind(new.year)
        .bind(now)
        .bind(id)
        .fetch_one(tx.conn())
        .await
        .map_err(SqlxErrorExt::into_data_error)?;

        let paper = self.load(tx.conn(), record).await?;
        tx.commit().await?;
        tracing::info!(paper_id = id, "Paper updated");
        Ok(Some(paper))
    }

    /// Remove a paper and its links. Authors stay.
    pub async fn delete(&self, id: i64) -> SqlxResult<bool> {
        let result = sqlx::query::<Sqlite>("DELETE FROM papers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(paper_id = id, "Paper deleted");
        }
        Ok(deleted)
    }

    async fn load(&self, conn: &mut SqliteConnection, record: PaperRecord) -> SqlxResult<Paper> {
        let mut authors = links::authors_by_paper(conn, &[record.id]).await?;
        Ok(Paper {
            authors: authors.remove(&record.id).unwrap_or_default(),
            record,
        })
    }
}
