pub mod author;
pub mod paper;

pub use author::{Author, AuthorFilter, AuthorInput, AuthorPage, AuthorQuery, AuthorRecord, NewAuthor};
pub use paper::{NewPaper, Paper, PaperFilter, PaperInput, PaperPage, PaperQuery, PaperRecord};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

/// `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub(crate) fn millis<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}
