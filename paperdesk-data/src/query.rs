/// A bind value produced by the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Int(i64),
    Text(String),
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

#[derive(Debug, Clone)]
enum Condition {
    Eq(String, SqlValue),
    ContainsCi(String, String),
}

/// A fluent builder for filtered, ordered, paginated SQLite SELECT and COUNT queries.
///
/// Identifiers are validated before they reach the SQL text; values are always
/// emitted as `?` placeholders and returned alongside the SQL as [`SqlValue`]s.
///
/// ```ignore
/// let (sql, params) = QueryBuilder::new("papers")
///     .where_eq("year", 2020)
///     .where_contains_ci("published_in", "nature")
///     .order_by("id", true)
///     .limit(10)
///     .build_select(&["id", "title"])?;
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    table: String,
    conditions: Vec<Condition>,
    order: Vec<(String, bool)>,
    limit_val: Option<u64>,
    offset_val: Option<u64>,
}

impl QueryBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            conditions: Vec::new(),
            order: Vec::new(),
            limit_val: None,
            offset_val: None,
        }
    }

    pub fn where_eq(mut self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.conditions
            .push(Condition::Eq(column.to_string(), value.into()));
        self
    }

    /// Case-insensitive substring match. The needle is bound as-is, so `%`
    /// and `_` have no special meaning.
    pub fn where_contains_ci(mut self, column: &str, needle: &str) -> Self {
        self.conditions
            .push(Condition::ContainsCi(column.to_string(), needle.to_string()));
        self
    }

    /// Apply `where_eq` only when a value is present.
    pub fn where_eq_opt(self, column: &str, value: Option<impl Into<SqlValue>>) -> Self {
        match value {
            Some(v) => self.where_eq(column, v),
            None => self,
        }
    }

    /// Apply `where_contains_ci` only when a needle is present.
    pub fn where_contains_ci_opt(self, column: &str, needle: Option<&str>) -> Self {
        match needle {
            Some(n) => self.where_contains_ci(column, n),
            None => self,
        }
    }

    pub fn order_by(mut self, column: &str, ascending: bool) -> Self {
        self.order.push((column.to_string(), ascending));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit_val = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset_val = Some(offset);
        self
    }

    /// Build a SELECT query returning `(sql, bind_values)`.
    pub fn build_select(&self, columns: &[&str]) -> Result<(String, Vec<SqlValue>), QueryError> {
        check_identifier(&self.table, "table")?;
        for column in columns {
            check_identifier(column, "column")?;
        }
        let mut sql = format!("SELECT {} FROM {}", columns.join(", "), self.table);
        let params = self.append_where(&mut sql)?;
        self.append_order(&mut sql)?;
        if let Some(limit) = self.limit_val {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.offset_val {
            if self.limit_val.is_none() {
                // SQLite only accepts OFFSET after a LIMIT clause.
                sql.push_str(" LIMIT -1");
            }
            sql.push_str(&format!(" OFFSET {offset}"));
        }
        Ok((sql, params))
    }

    /// Build a COUNT query over the same conditions, ignoring order and pagination.
    pub fn build_count(&self) -> Result<(String, Vec<SqlValue>), QueryError> {
        check_identifier(&self.table, "table")?;
        let mut sql = format!("SELECT COUNT(*) FROM {}", self.table);
        let params = self.append_where(&mut sql)?;
        Ok((sql, params))
    }

    fn append_where(&self, sql: &mut String) -> Result<Vec<SqlValue>, QueryError> {
        let mut params = Vec::new();
        if self.conditions.is_empty() {
            return Ok(params);
        }
        let mut clauses = Vec::with_capacity(self.conditions.len());
        for cond in &self.conditions {
            match cond {
                Condition::Eq(col, val) => {
                    check_identifier(col, "column")?;
                    params.push(val.clone());
                    clauses.push(format!("{col} = ?"));
                }
                Condition::ContainsCi(col, needle) => {
                    check_identifier(col, "column")?;
                    params.push(SqlValue::Text(needle.clone()));
                    clauses.push(format!("instr(lower({col}), lower(?)) > 0"));
                }
            }
        }
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
        Ok(params)
    }

    fn append_order(&self, sql: &mut String) -> Result<(), QueryError> {
        if self.order.is_empty() {
            return Ok(());
        }
        let mut clauses = Vec::with_capacity(self.order.len());
        for (col, asc) in &self.order {
            check_identifier(col, "column")?;
            clauses.push(format!("{col} {}", if *asc { "ASC" } else { "DESC" }));
        }
        sql.push_str(" ORDER BY ");
        sql.push_str(&clauses.join(", "));
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    InvalidIdentifier { kind: &'static str, ident: String },
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::InvalidIdentifier { kind, ident } => {
                write!(f, "Invalid {kind} identifier: {ident}")
            }
        }
    }
}

impl std::error::Error for QueryError {}

fn check_identifier(ident: &str, kind: &'static str) -> Result<(), QueryError> {
    if ident == "*" || (!ident.is_empty() && ident.split('.').all(is_valid_segment)) {
        Ok(())
    } else {
        Err(QueryError::InvalidIdentifier {
            kind,
            ident: ident.to_string(),
        })
    }
}

fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_select() {
        let (sql, params) = QueryBuilder::new("papers").build_select(&["*"]).unwrap();
        assert_eq!(sql, "SELECT * FROM papers");
        assert!(params.is_empty());
    }

    #[test]
    fn filters_order_and_pagination() {
        let (sql, params) = QueryBuilder::new("papers")
            .where_eq("year", 2020)
            .where_contains_ci("published_in", "Nature")
            .order_by("id", true)
            .limit(10)
            .offset(20)
            .build_select(&["id", "title"])
            .unwrap();
        assert_eq!(
            sql,
            "SELECT id, title FROM papers WHERE year = ? AND instr(lower(published_in), lower(?)) > 0 \
             ORDER BY id ASC LIMIT 10 OFFSET 20"
        );
        assert_eq!(params, vec![SqlValue::Int(2020), SqlValue::Text("Nature".into())]);
    }

    #[test]
    fn optional_filters_are_skipped() {
        let (sql, params) = QueryBuilder::new("authors")
            .where_contains_ci_opt("name", None)
            .where_eq_opt("id", None::<i64>)
            .build_count()
            .unwrap();
        assert_eq!(sql, "SELECT COUNT(*) FROM authors");
        assert!(params.is_empty());
    }

    #[test]
    fn count_ignores_pagination() {
        let (sql, params) = QueryBuilder::new("papers")
            .where_eq("year", 1999)
            .order_by("id", false)
            .limit(5)
            .build_count()
            .unwrap();
        assert_eq!(sql, "SELECT COUNT(*) FROM papers WHERE year = ?");
        assert_eq!(params, vec![SqlValue::Int(1999)]);
    }

    #[test]
    fn offset_without_limit() {
        let (sql, _) = QueryBuilder::new("papers")
            .offset(3)
            .build_select(&["id"])
            .unwrap();
        assert_eq!(sql, "SELECT id FROM papers LIMIT -1 OFFSET 3");
    }

    #[test]
    fn invalid_identifiers_are_rejected() {
        let err = QueryBuilder::new("papers;drop").build_select(&["*"]).unwrap_err();
        assert!(matches!(err, QueryError::InvalidIdentifier { kind: "table", .. }));

        let err = QueryBuilder::new("papers")
            .order_by("id desc", true)
            .build_select(&["id"])
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidIdentifier { kind: "column", .. }));
    }
}
