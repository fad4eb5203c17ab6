use chrono::{DateTime, Utc};
use paperdesk_data::{Entity, Page, PageRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::author::{AuthorRecord, NewAuthor};

/// A `papers` row.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PaperRecord {
    pub id: i64,
    pub title: String,
    pub published_in: String,
    pub year: i64,
    #[serde(serialize_with = "super::millis")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "super::millis")]
    pub updated_at: DateTime<Utc>,
}

impl Entity for PaperRecord {
    type Id = i64;

    fn table_name() -> &'static str {
        "papers"
    }

    fn id_column() -> &'static str {
        "id"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "title", "published_in", "year", "created_at", "updated_at"]
    }

    fn id(&self) -> &i64 {
        &self.id
    }
}

/// A paper with its authors, ordered by ascending author id.
#[derive(Clone, Debug, Serialize)]
pub struct Paper {
    #[serde(flatten)]
    pub record: PaperRecord,
    pub authors: Vec<AuthorRecord>,
}

/// Raw request body. Fields stay untyped so every rule can report its own message.
#[derive(Debug, Default, Deserialize)]
pub struct PaperInput {
    pub title: Option<Value>,
    #[serde(rename = "publishedIn")]
    pub published_in: Option<Value>,
    pub year: Option<Value>,
    pub authors: Option<Value>,
}

/// A validated paper body.
#[derive(Clone, Debug, PartialEq)]
pub struct NewPaper {
    pub title: String,
    pub published_in: String,
    pub year: i64,
    pub authors: Vec<NewAuthor>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaperFilter {
    pub year: Option<i64>,
    pub published_in: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PaperPage {
    pub papers: Vec<Paper>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

impl From<Page<Paper>> for PaperPage {
    fn from(page: Page<Paper>) -> Self {
        Self {
            papers: page.content,
            total: page.total,
            limit: page.limit,
            offset: page.offset,
        }
    }
}

/// Parsed list query for `/api/papers`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaperQuery {
    pub filter: PaperFilter,
    pub page: PageRequest,
}
