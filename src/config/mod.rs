use std::env;

use crate::models::pagination::{PaginationConfig, DEFAULT_ADJACENT, DEFAULT_PER_PAGE};
use crate::services::renderer::{CssClasses, RenderConfig};
use crate::services::source::LimitDialect;

/// Statement served when `PAGINATE_SOURCE_SQL` is unset: always empty.
const EMPTY_SOURCE_SQL: &str = "SELECT 1 AS value WHERE FALSE";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    /// Unlimited SELECT statement behind the records routes.
    pub source_sql: String,
    pub per_page: i64,
    pub adjacent: i64,
    pub return_url: String,
    pub link_query: String,
    pub div_class: String,
    pub current_class: String,
    pub disabled_class: String,
    /// Limit clause spelling shown by the SQL preview route.
    pub dialect: LimitDialect,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        let classes = CssClasses::default();
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            source_sql: env::var("PAGINATE_SOURCE_SQL")
                .unwrap_or_else(|_| EMPTY_SOURCE_SQL.to_string()),
            per_page: positive_or(env::var("PAGINATE_PER_PAGE").ok(), DEFAULT_PER_PAGE),
            adjacent: positive_or(env::var("PAGINATE_ADJACENT").ok(), DEFAULT_ADJACENT),
            return_url: env::var("PAGINATE_RETURN_URL").unwrap_or_default(),
            link_query: env::var("PAGINATE_LINK_QUERY").unwrap_or_default(),
            div_class: env::var("PAGINATE_DIV_CLASS").unwrap_or(classes.container),
            current_class: env::var("PAGINATE_CURRENT_CLASS").unwrap_or(classes.current),
            disabled_class: env::var("PAGINATE_DISABLED_CLASS").unwrap_or(classes.disabled),
            dialect: dialect_or_default(env::var("PAGINATE_DIALECT").ok()),
        })
    }

    /// Page size and window used when a request leaves them out.
    pub fn pagination_defaults(&self) -> PaginationConfig {
        PaginationConfig::new(1, self.per_page, self.adjacent)
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            return_url: self.return_url.clone(),
            link_query: self.link_query.clone(),
            classes: CssClasses {
                container: self.div_class.clone(),
                current: self.current_class.clone(),
                disabled: self.disabled_class.clone(),
            },
            ..Default::default()
        }
    }
}

/// Parse a strictly positive integer, falling back to `default`.
fn positive_or(raw: Option<String>, default: i64) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

/// Parse a limit dialect name, falling back to Postgres.
fn dialect_or_default(raw: Option<String>) -> LimitDialect {
    match raw.map(|v| v.parse::<LimitDialect>()) {
        Some(Ok(dialect)) => dialect,
        Some(Err(e)) => {
            tracing::warn!(error = %e, "Invalid PAGINATE_DIALECT, using default");
            LimitDialect::default()
        }
        None => LimitDialect::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            database_url: "postgres://localhost/test".to_string(),
            database_max_connections: 5,
            host: "127.0.0.1".to_string(),
            port: 3000,
            source_sql: EMPTY_SOURCE_SQL.to_string(),
            per_page: 20,
            adjacent: 4,
            return_url: "/items".to_string(),
            link_query: "?sort=name".to_string(),
            div_class: "pager".to_string(),
            current_class: "active".to_string(),
            disabled_class: "off".to_string(),
            dialect: LimitDialect::Postgres,
        }
    }

    #[test]
    fn positive_or_parses() {
        assert_eq!(positive_or(Some("25".to_string()), 50), 25);
        assert_eq!(positive_or(Some(" 7 ".to_string()), 50), 7);
    }

    #[test]
    fn positive_or_rejects_invalid() {
        assert_eq!(positive_or(None, 50), 50);
        assert_eq!(positive_or(Some("0".to_string()), 50), 50);
        assert_eq!(positive_or(Some("-3".to_string()), 8), 8);
        assert_eq!(positive_or(Some("many".to_string()), 8), 8);
    }

    #[test]
    fn dialect_parsing() {
        assert_eq!(dialect_or_default(None), LimitDialect::Postgres);
        assert_eq!(dialect_or_default(Some("MySQL".to_string())), LimitDialect::MySql);
        assert_eq!(dialect_or_default(Some("sqlite".to_string())), LimitDialect::Postgres);
    }

    #[test]
    fn pagination_defaults_from_config() {
        let defaults = config().pagination_defaults();
        assert_eq!(defaults.per_page, 20);
        assert_eq!(defaults.adjacent, 4);
        assert_eq!(defaults.requested_page, 1);
    }

    #[test]
    fn render_config_from_config() {
        let render = config().render_config();
        assert_eq!(render.page_url(2), "/items?sort=name&page=2");
        assert_eq!(render.classes.container, "pager");
        assert_eq!(render.classes.current, "active");
        assert_eq!(render.classes.disabled, "off");
        assert_eq!(render.labels.next, "Next ");
    }
}
