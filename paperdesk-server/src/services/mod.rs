mod author_service;
mod links;
mod paper_service;

pub use author_service::{AuthorService, SOLE_AUTHOR_MESSAGE};
pub use paper_service::PaperService;
