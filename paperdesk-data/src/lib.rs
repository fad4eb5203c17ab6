pub mod entity;
pub mod error;
pub mod page;
pub mod query;

pub use entity::Entity;
pub use error::DataError;
pub use page::{Page, PageRequest};
pub use query::{QueryBuilder, QueryError, SqlValue};

pub mod prelude {
    //! Re-exports of the most commonly used data types.
    pub use crate::{DataError, Entity, Page, PageRequest, QueryBuilder, SqlValue};
}
