use paperdesk_data::SqlValue;
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::{Database, Sqlite};

type Args<'q> = <Sqlite as Database>::Arguments<'q>;

/// Bind `QueryBuilder` values, in order, onto a sqlx query.
pub trait BindValues: Sized {
    fn bind_values(self, values: Vec<SqlValue>) -> Self;
}

impl<'q, O> BindValues for QueryAs<'q, Sqlite, O, Args<'q>> {
    fn bind_values(self, values: Vec<SqlValue>) -> Self {
        values.into_iter().fold(self, |query, value| match value {
            SqlValue::Int(v) => query.bind(v),
            SqlValue::Text(v) => query.bind(v),
        })
    }
}

impl<'q, O> BindValues for QueryScalar<'q, Sqlite, O, Args<'q>> {
    fn bind_values(self, values: Vec<SqlValue>) -> Self {
        values.into_iter().fold(self, |query, value| match value {
            SqlValue::Int(v) => query.bind(v),
            SqlValue::Text(v) => query.bind(v),
        })
    }
}
