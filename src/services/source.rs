//! Paged execution of a caller-supplied SQL statement.
//!
//! The statement is counted once without a limit, the engine picks the page, and the
//! page rows are fetched with the limit clause appended.

use std::fmt;
use std::str::FromStr;

use sqlx::postgres::PgArguments;
use sqlx::query::QueryScalar;
use sqlx::{PgPool, Postgres};

use crate::errors::AppError;
use crate::models::pagination::{PagedRows, PaginationConfig, PaginationState};
use crate::services::engine;

/// How a limit clause is spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LimitDialect {
    /// `LIMIT <limit> OFFSET <offset>`
    #[default]
    Postgres,
    /// `LIMIT <offset>, <limit>`
    MySql,
}

impl LimitDialect {
    pub fn limit_clause(self, offset: i64, limit: i64) -> String {
        match self {
            Self::Postgres => format!("LIMIT {limit} OFFSET {offset}"),
            Self::MySql => format!("LIMIT {offset}, {limit}"),
        }
    }
}

impl FromStr for LimitDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "mysql" | "mariadb" => Ok(Self::MySql),
            other => Err(format!("unknown limit dialect: {other}")),
        }
    }
}

impl fmt::Display for LimitDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => f.write_str("postgres"),
            Self::MySql => f.write_str("mysql"),
        }
    }
}

/// Positional parameter bound to both the count and the page query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    Int(i64),
    Text(String),
    Bool(bool),
}

/// An unlimited SELECT statement with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedQuery {
    sql: String,
    params: Vec<QueryParam>,
}

impl PagedQuery {
    /// Wrap `sql`. Trailing semicolons are dropped so the statement nests as a subquery.
    pub fn new(sql: impl Into<String>) -> Self {
        let sql = sql.into();
        let trimmed = sql.trim().trim_end_matches(';').trim_end();
        Self {
            sql: trimmed.to_string(),
            params: Vec::new(),
        }
    }

    pub fn bind(mut self, param: QueryParam) -> Self {
        self.params.push(param);
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[QueryParam] {
        &self.params
    }

    /// Statement returning the number of rows of the unlimited query.
    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) FROM ({}) AS paged_source", self.sql)
    }

    /// The statement restricted to the rows of the current page.
    pub fn limited_sql(&self, state: &PaginationState, dialect: LimitDialect) -> String {
        let (offset, limit) = engine::offset_and_limit(state);
        format!("{} {}", self.sql, dialect.limit_clause(offset, limit))
    }

    /// Page statement returning each row as one JSON object.
    fn fetch_sql(&self, state: &PaginationState) -> String {
        format!(
            "SELECT row_to_json(paged_rows) FROM ({}) AS paged_rows",
            self.limited_sql(state, LimitDialect::Postgres)
        )
    }

    fn bind_all<'q, O: Send + Unpin>(
        &'q self,
        mut query: QueryScalar<'q, Postgres, O, PgArguments>,
    ) -> QueryScalar<'q, Postgres, O, PgArguments> {
        for param in &self.params {
            query = match param {
                QueryParam::Int(v) => query.bind(*v),
                QueryParam::Text(v) => query.bind(v.as_str()),
                QueryParam::Bool(v) => query.bind(*v),
            };
        }
        query
    }

    /// Number of rows of the unlimited statement.
    pub async fn count(&self, pool: &PgPool) -> Result<i64, AppError> {
        let sql = self.count_sql();
        let total = self
            .bind_all(sqlx::query_scalar::<_, i64>(&sql))
            .fetch_one(pool)
            .await?;
        Ok(total)
    }

    /// Rows of the page described by `state`.
    pub async fn fetch(
        &self,
        pool: &PgPool,
        state: &PaginationState,
    ) -> Result<Vec<serde_json::Value>, AppError> {
        if state.is_empty() {
            return Ok(Vec::new());
        }
        let sql = self.fetch_sql(state);
        let rows = self
            .bind_all(sqlx::query_scalar::<_, serde_json::Value>(&sql))
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// Count, pick the page, fetch it.
    pub async fn paginate(
        &self,
        pool: &PgPool,
        config: &PaginationConfig,
    ) -> Result<PagedRows<serde_json::Value>, AppError> {
        let total_rows = self.count(pool).await?;
        let plan = engine::plan(config, total_rows);
        tracing::debug!(
            total_rows,
            page = plan.state.current_page(),
            total_pages = plan.state.total_pages(),
            "Fetching page"
        );
        let items = self.fetch(pool, &plan.state).await?;
        Ok(PagedRows { items, plan })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(total_rows: i64, per_page: i64, page: i64) -> PaginationState {
        engine::derive(&PaginationConfig::new(page, per_page, 8), total_rows)
    }

    #[test]
    fn trailing_semicolon_removed() {
        let q = PagedQuery::new("  SELECT * FROM items ORDER BY id ;; \n");
        assert_eq!(q.sql(), "SELECT * FROM items ORDER BY id");
    }

    #[test]
    fn count_wraps_statement() {
        let q = PagedQuery::new("SELECT id FROM items WHERE owner = $1");
        assert_eq!(
            q.count_sql(),
            "SELECT COUNT(*) FROM (SELECT id FROM items WHERE owner = $1) AS paged_source"
        );
    }

    #[test]
    fn postgres_limit_clause() {
        let q = PagedQuery::new("SELECT id FROM items");
        assert_eq!(
            q.limited_sql(&state(500, 50, 3), LimitDialect::Postgres),
            "SELECT id FROM items LIMIT 50 OFFSET 100"
        );
    }

    #[test]
    fn mysql_limit_clause() {
        let q = PagedQuery::new("SELECT id FROM items");
        assert_eq!(
            q.limited_sql(&state(500, 50, 3), LimitDialect::MySql),
            "SELECT id FROM items LIMIT 100, 50"
        );
    }

    #[test]
    fn limit_uses_clamped_page() {
        let q = PagedQuery::new("SELECT id FROM items");
        assert_eq!(
            q.limited_sql(&state(120, 50, 99), LimitDialect::Postgres),
            "SELECT id FROM items LIMIT 50 OFFSET 100"
        );
    }

    #[test]
    fn limit_never_exceeds_max_page_size() {
        let q = PagedQuery::new("SELECT id FROM items");
        assert_eq!(
            q.limited_sql(&state(5_000_000, 1_000_000_000, 2), LimitDialect::Postgres),
            "SELECT id FROM items LIMIT 100 OFFSET 100"
        );
    }

    #[test]
    fn fetch_sql_converts_rows_to_json() {
        let q = PagedQuery::new("SELECT id FROM items");
        assert_eq!(
            q.fetch_sql(&state(10, 5, 2)),
            "SELECT row_to_json(paged_rows) FROM (SELECT id FROM items LIMIT 5 OFFSET 5) AS paged_rows"
        );
    }

    #[test]
    fn params_kept_in_order() {
        let q = PagedQuery::new("SELECT id FROM items WHERE owner = $1 AND active = $2")
            .bind(QueryParam::Text("alice".to_string()))
            .bind(QueryParam::Bool(true));
        assert_eq!(
            q.params(),
            &[QueryParam::Text("alice".to_string()), QueryParam::Bool(true)]
        );
    }

    #[test]
    fn dialect_from_str() {
        assert_eq!("Postgres".parse::<LimitDialect>().unwrap(), LimitDialect::Postgres);
        assert_eq!(" mysql ".parse::<LimitDialect>().unwrap(), LimitDialect::MySql);
        assert!("oracle".parse::<LimitDialect>().is_err());
        assert_eq!(LimitDialect::MySql.to_string(), "mysql");
    }
}
