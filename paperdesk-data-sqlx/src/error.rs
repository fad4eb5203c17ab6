use paperdesk_data::DataError;

/// Extension trait for converting `sqlx::Error` into `DataError`.
///
/// Orphan rules forbid `From<sqlx::Error> for DataError` in this crate, so
/// call sites use `.map_err(SqlxErrorExt::into_data_error)`.
pub trait SqlxErrorExt {
    fn into_data_error(self) -> DataError;
}

impl SqlxErrorExt for sqlx::Error {
    fn into_data_error(self) -> DataError {
        match &self {
            sqlx::Error::RowNotFound => DataError::NotFound("Row not found".into()),
            _ => DataError::database(self),
        }
    }
}

/// Data-layer results using `DataError`.
pub type SqlxResult<T> = Result<T, DataError>;
