//! Reads and writes on the `paper_authors` join table.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use paperdesk_data_sqlx::{SqlxErrorExt, SqlxResult};
use sqlx::{Sqlite, SqliteConnection};

use crate::models::{AuthorRecord, NewAuthor, PaperRecord};

#[derive(sqlx::FromRow)]
struct LinkedAuthor {
    paper_id: i64,
    #[sqlx(flatten)]
    author: AuthorRecord,
}

#[derive(sqlx::FromRow)]
struct LinkedPaper {
    author_id: i64,
    #[sqlx(flatten)]
    paper: PaperRecord,
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

/// Authors of each paper, ordered by ascending author id.
pub(crate) async fn authors_by_paper(
    conn: &mut SqliteConnection,
    paper_ids: &[i64],
) -> SqlxResult<HashMap<i64, Vec<AuthorRecord>>> {
    let mut grouped: HashMap<i64, Vec<AuthorRecord>> = HashMap::new();
    if paper_ids.is_empty() {
        return Ok(grouped);
    }
    let sql = format!(
        "SELECT pa.paper_id, a.id, a.name, a.email, a.affiliation, a.created_at, a.updated_at \
         FROM paper_authors pa JOIN authors a ON a.id = pa.author_id \
         WHERE pa.paper_id IN ({}) ORDER BY pa.paper_id, a.id",
        placeholders(paper_ids.len())
    );
    let rows = paper_ids
        .iter()
        .fold(sqlx::query_as::<Sqlite, LinkedAuthor>(&sql), |q, id| q.bind(*id))
        .fetch_all(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_data_error)?;
    for row in rows {
        grouped.entry(row.paper_id).or_default().push(row.author);
    }
    Ok(grouped)
}

/// Papers of each author, ordered by ascending paper id.
pub(crate) async fn papers_by_author(
    conn: &mut SqliteConnection,
    author_ids: &[i64],
) -> SqlxResult<HashMap<i64, Vec<PaperRecord>>> {
    let mut grouped: HashMap<i64, Vec<PaperRecord>> = HashMap::new();
    if author_ids.is_empty() {
        return Ok(grouped);
    }
    let sql = format!(
        "SELECT pa.author_id, p.id, p.title, p.published_in, p.year, p.created_at, p.updated_at \
         FROM paper_authors pa JOIN papers p ON p.id = pa.paper_id \
         WHERE pa.author_id IN ({}) ORDER BY pa.author_id, p.id",
        placeholders(author_ids.len())
    );
    let rows = author_ids
        .iter()
        .fold(sqlx::query_as::<Sqlite, LinkedPaper>(&sql), |q, id| q.bind(*id))
        .fetch_all(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_data_error)?;
    for row in rows {
        grouped.entry(row.author_id).or_default().push(row.paper);
    }
    Ok(grouped)
}

/// Reuse the lowest-id author with the same name, email and affiliation, or insert one.
///
/// Returned ids are distinct and keep the order of first appearance.
pub(crate) async fn resolve_authors(
    conn: &mut SqliteConnection,
    authors: &[NewAuthor],
    now: DateTime<Utc>,
) -> SqlxResult<Vec<i64>> {
    let mut ids = Vec::with_capacity(authors.len());
    for author in authors {
        let existing = sqlx::query_scalar::<Sqlite, i64>(
            "SELECT id FROM authors WHERE name = ? AND email IS ? AND affiliation IS ? ORDER BY id LIMIT 1",
        )
        .bind(&author.name)
        .bind(&author.email)
        .bind(&author.affiliation)
        .fetch_optional(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_data_error)?;

        let id = match existing {
            Some(id) => {
                tracing::debug!(author_id = id, name = %author.name, "Reusing existing author");
                id
            }
            None => insert_author(conn, author, now).await?.id,
        };
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

pub(crate) async fn insert_author(
    conn: &mut SqliteConnection,
    author: &NewAuthor,
    now: DateTime<Utc>,
) -> SqlxResult<AuthorRecord> {
    sqlx::query_as::<Sqlite, AuthorRecord>(
        "INSERT INTO authors (name, email, affiliation, created_at, updated_at) VALUES (?, ?, ?, ?, ?) \
         RETURNING id, name, email, affiliation, created_at, updated_at",
    )
    .bind(&author.name)
    .bind(&author.email)
    .bind(&author.affiliation)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_data_error)
}

/// Replace every author link of a paper.
pub(crate) async fn replace_paper_authors(
    conn: &mut SqliteConnection,
    paper_id: i64,
    author_ids: &[i64],
) -> SqlxResult<()> {
    sqlx::query::<Sqlite>("DELETE FROM paper_authors WHERE paper_id = ?")
        .bind(paper_id)
        .execute(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_data_error)?;
    for author_id in author_ids {
        sqlx::query::<Sqlite>("INSERT INTO paper_authors (paper_id, author_id) VALUES (?, ?)")
            .bind(paper_id)
            .bind(author_id)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
    }
    Ok(())
}
