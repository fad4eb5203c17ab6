use chrono::{DateTime, Utc};
use paperdesk_data::{Entity, Page, PageRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::paper::PaperRecord;

/// An `authors` row.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRecord {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub affiliation: Option<String>,
    #[serde(serialize_with = "super::millis")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "super::millis")]
    pub updated_at: DateTime<Utc>,
}

impl Entity for AuthorRecord {
    type Id = i64;

    fn table_name() -> &'static str {
        "authors"
    }

    fn id_column() -> &'static str {
        "id"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name", "email", "affiliation", "created_at", "updated_at"]
    }

    fn id(&self) -> &i64 {
        &self.id
    }
}

/// An author with the papers they wrote, ordered by ascending paper id.
#[derive(Clone, Debug, Serialize)]
pub struct Author {
    #[serde(flatten)]
    pub record: AuthorRecord,
    pub papers: Vec<PaperRecord>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AuthorInput {
    pub name: Option<Value>,
    pub email: Option<Value>,
    pub affiliation: Option<Value>,
}

/// A validated author, also used for the entries of a paper body.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NewAuthor {
    pub name: String,
    pub email: Option<String>,
    pub affiliation: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthorFilter {
    pub name: Option<String>,
    pub affiliation: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthorPage {
    pub authors: Vec<Author>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

impl From<Page<Author>> for AuthorPage {
    fn from(page: Page<Author>) -> Self {
        Self {
            authors: page.content,
            total: page.total,
            limit: page.limit,
            offset: page.offset,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthorQuery {
    pub filter: AuthorFilter,
    pub page: PageRequest,
}
