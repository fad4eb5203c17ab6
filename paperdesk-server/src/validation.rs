//! Request rules for paper and author bodies and list queries.
//!
//! Body rules accumulate in a fixed order: title, venue, year, authors.

use paperdesk_core::params::ParamError;
use paperdesk_core::validation::{as_integer, is_absent, non_blank, optional_string};
use paperdesk_core::{QueryParams, ValidationErrors};
use paperdesk_data::page::MAX_LIMIT;
use paperdesk_data::PageRequest;
use serde_json::Value;

use crate::models::{
    AuthorFilter, AuthorInput, AuthorQuery, NewAuthor, NewPaper, PaperFilter, PaperInput,
    PaperQuery,
};

pub const TITLE_REQUIRED: &str = "Title is required";
pub const VENUE_REQUIRED: &str = "Published venue is required";
pub const YEAR_REQUIRED: &str = "Published year is required";
pub const YEAR_INVALID: &str = "Valid year after 1900 is required";
pub const AUTHORS_REQUIRED: &str = "At least one author is required";
pub const AUTHOR_NAME_REQUIRED: &str = "Author name is required";
pub const NAME_REQUIRED: &str = "Name is required";

const MIN_YEAR_EXCLUSIVE: i64 = 1900;

pub fn validate_paper(input: &PaperInput) -> Result<NewPaper, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = non_blank(input.title.as_ref());
    if title.is_none() {
        errors.push(TITLE_REQUIRED);
    }

    let published_in = non_blank(input.published_in.as_ref());
    if published_in.is_none() {
        errors.push(VENUE_REQUIRED);
    }

    let year = if is_absent(input.year.as_ref()) {
        errors.push(YEAR_REQUIRED);
        None
    } else {
        let year = input
            .year
            .as_ref()
            .and_then(as_integer)
            .filter(|year| *year > MIN_YEAR_EXCLUSIVE);
        if year.is_none() {
            errors.push(YEAR_INVALID);
        }
        year
    };

    let authors = match input.authors.as_ref() {
        Some(Value::Array(items)) if !items.is_empty() => {
            let authors = items.iter().map(author_entry).collect::<Option<Vec<_>>>();
            if authors.is_none() {
                errors.push(AUTHOR_NAME_REQUIRED);
            }
            authors
        }
        _ => {
            errors.push(AUTHORS_REQUIRED);
            None
        }
    };

    match (title, published_in, year, authors) {
        (Some(title), Some(published_in), Some(year), Some(authors)) if errors.is_empty() => {
            Ok(NewPaper {
                title: title.to_string(),
                published_in: published_in.to_string(),
                year,
                authors,
            })
        }
        _ => Err(errors),
    }
}

/// One entry of a paper's `authors` array. `None` when it has no usable name.
fn author_entry(value: &Value) -> Option<NewAuthor> {
    let entry = value.as_object()?;
    let name = non_blank(entry.get("name"))?;
    Some(NewAuthor {
        name: name.to_string(),
        email: optional_string(entry.get("email")),
        affiliation: optional_string(entry.get("affiliation")),
    })
}

pub fn validate_author(input: &AuthorInput) -> Result<NewAuthor, ValidationErrors> {
    match non_blank(input.name.as_ref()) {
        Some(name) => Ok(NewAuthor {
            name: name.to_string(),
            email: optional_string(input.email.as_ref()),
            affiliation: optional_string(input.affiliation.as_ref()),
        }),
        None => Err([NAME_REQUIRED].into_iter().collect()),
    }
}

fn page_request(params: &QueryParams) -> Result<PageRequest, ParamError> {
    let limit = params.int_in("limit", 1..=MAX_LIMIT as i64)?;
    let offset = params.int_in("offset", 0..=i64::MAX)?;
    Ok(PageRequest::new(
        limit.map(|v| v as u64),
        offset.map(|v| v as u64),
    ))
}

pub fn paper_query(raw: Option<&str>) -> Result<PaperQuery, ParamError> {
    let params = QueryParams::parse(raw);
    let filter = PaperFilter {
        year: params.int_in("year", MIN_YEAR_EXCLUSIVE + 1..=i64::MAX)?,
        published_in: params.text("publishedIn"),
    };
    Ok(PaperQuery {
        filter,
        page: page_request(&params)?,
    })
}

pub fn author_query(raw: Option<&str>) -> Result<AuthorQuery, ParamError> {
    let params = QueryParams::parse(raw);
    let filter = AuthorFilter {
        name: params.text("name"),
        affiliation: params.text("affiliation"),
    };
    Ok(AuthorQuery {
        filter,
        page: page_request(&params)?,
    })
}
