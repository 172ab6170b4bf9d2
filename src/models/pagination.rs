//! Pagination input, derived state and link descriptors shared by the engine,
//! the renderer and every paged endpoint.

use serde::{Deserialize, Serialize};

/// Default rows per page.
pub const DEFAULT_PER_PAGE: i64 = 50;

/// Default number of page links on each side of the current page.
pub const DEFAULT_ADJACENT: i64 = 8;

/// Maximum rows per page.
pub const MAX_PER_PAGE: i64 = 100;

/// Maximum number of page links on each side of the current page.
pub const MAX_ADJACENT: i64 = 50;

/// Caller-supplied pagination settings for one request.
///
/// Values are stored as given; the engine absorbs anomalies (non-positive or oversized
/// sizes, out-of-range pages) when it derives a [`PaginationState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationConfig {
    pub per_page: i64,
    pub adjacent: i64,
    pub requested_page: i64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            adjacent: DEFAULT_ADJACENT,
            requested_page: 1,
        }
    }
}

impl PaginationConfig {
    pub fn new(requested_page: i64, per_page: i64, adjacent: i64) -> Self {
        Self {
            per_page,
            adjacent,
            requested_page,
        }
    }
}

/// Raw page query parameters, kept as text so malformed input never rejects a request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub adjacent: Option<String>,
}

impl PageQuery {
    /// Resolve the raw values against `defaults`.
    ///
    /// Anything that does not parse as an integer is replaced by the default (page 1 for
    /// the page number). Range checks are left to the engine.
    pub fn to_config(&self, defaults: &PaginationConfig) -> PaginationConfig {
        PaginationConfig {
            per_page: parse_int(self.per_page.as_deref()).unwrap_or(defaults.per_page),
            adjacent: parse_int(self.adjacent.as_deref()).unwrap_or(defaults.adjacent),
            requested_page: parse_int(self.page.as_deref()).unwrap_or(1),
        }
    }
}

/// Parse an optional integer, tolerating surrounding whitespace.
pub fn parse_int(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    match raw.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            if !raw.is_empty() {
                tracing::debug!(value = %raw, "Ignoring non-integer pagination parameter");
            }
            None
        }
    }
}

/// Read-only pagination facts for one request.
///
/// Only the engine builds this type, which keeps the clamping invariants in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    pub(crate) total_rows: i64,
    pub(crate) per_page: i64,
    pub(crate) adjacent: i64,
    pub(crate) requested_page: i64,
    pub(crate) total_pages: i64,
    pub(crate) current_page: i64,
    pub(crate) offset: i64,
    pub(crate) left_window: i64,
    pub(crate) right_window: i64,
    pub(crate) skip_level: Option<i64>,
}

impl PaginationState {
    pub fn total_rows(&self) -> i64 {
        self.total_rows
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    pub fn adjacent(&self) -> i64 {
        self.adjacent
    }

    /// The page number as the caller asked for it, before clamping.
    pub fn requested_page(&self) -> i64 {
        self.requested_page
    }

    pub fn total_pages(&self) -> i64 {
        self.total_pages
    }

    pub fn current_page(&self) -> i64 {
        self.current_page
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn left_window(&self) -> i64 {
        self.left_window
    }

    pub fn right_window(&self) -> i64 {
        self.right_window
    }

    /// Jump size of the "..." links, `None` past the last threshold.
    pub fn skip_level(&self) -> Option<i64> {
        self.skip_level
    }

    pub fn is_empty(&self) -> bool {
        self.total_rows == 0
    }
}

/// Kind of a navigation element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkKind {
    First,
    Prev,
    Next,
    Last,
    SkipLeft,
    SkipRight,
    Page,
    Current,
}

/// One element of the navigation bar, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDescriptor {
    pub kind: LinkKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<i64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl LinkDescriptor {
    pub fn link(kind: LinkKind, target: i64) -> Self {
        Self {
            kind,
            target: Some(target),
            disabled: false,
        }
    }

    /// Greyed-out control without a target.
    pub fn disabled(kind: LinkKind) -> Self {
        Self {
            kind,
            target: None,
            disabled: true,
        }
    }

    pub fn current(page: i64) -> Self {
        Self {
            kind: LinkKind::Current,
            target: Some(page),
            disabled: false,
        }
    }

    /// Whether following this element moves to another page.
    pub fn is_navigational(&self) -> bool {
        !self.disabled && self.kind != LinkKind::Current
    }
}

/// "from - to / total" figures for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub from: i64,
    pub to: i64,
    pub total: i64,
}

/// Everything a caller needs to query and render one page.
#[derive(Debug, Clone, Serialize)]
pub struct PaginationPlan {
    pub state: PaginationState,
    pub summary: ResultSummary,
    pub links: Vec<LinkDescriptor>,
    pub offset: i64,
    pub limit: i64,
}

/// Paged rows returned by list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct PagedRows<T: Serialize> {
    pub items: Vec<T>,
    #[serde(flatten)]
    pub plan: PaginationPlan,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_defaults() {
        let q = PageQuery::default();
        let config = q.to_config(&PaginationConfig::default());
        assert_eq!(config, PaginationConfig::default());
    }

    #[test]
    fn page_query_parses_integers() {
        let q = PageQuery {
            page: Some(" 7 ".to_string()),
            per_page: Some("20".to_string()),
            adjacent: Some("3".to_string()),
        };
        let config = q.to_config(&PaginationConfig::default());
        assert_eq!(config, PaginationConfig::new(7, 20, 3));
    }

    #[test]
    fn page_query_non_numeric_falls_back() {
        let q = PageQuery {
            page: Some("abc".to_string()),
            per_page: Some("2.5".to_string()),
            adjacent: Some(String::new()),
        };
        let defaults = PaginationConfig::new(1, 25, 4);
        let config = q.to_config(&defaults);
        assert_eq!(config.requested_page, 1);
        assert_eq!(config.per_page, 25);
        assert_eq!(config.adjacent, 4);
    }

    #[test]
    fn page_query_keeps_negative_page_for_engine() {
        let q = PageQuery {
            page: Some("-3".to_string()),
            ..Default::default()
        };
        assert_eq!(q.to_config(&PaginationConfig::default()).requested_page, -3);
    }

    #[test]
    fn link_descriptor_serializes_kebab_case() {
        let json = serde_json::to_value(LinkDescriptor::link(LinkKind::SkipRight, 11)).unwrap();
        assert_eq!(json["kind"], "skip-right");
        assert_eq!(json["target"], 11);
        assert!(json.get("disabled").is_none());

        let json = serde_json::to_value(LinkDescriptor::disabled(LinkKind::Prev)).unwrap();
        assert_eq!(json["kind"], "prev");
        assert_eq!(json["disabled"], true);
        assert!(json.get("target").is_none());
    }

    #[test]
    fn current_is_not_navigational() {
        assert!(!LinkDescriptor::current(3).is_navigational());
        assert!(!LinkDescriptor::disabled(LinkKind::Next).is_navigational());
        assert!(LinkDescriptor::link(LinkKind::Page, 2).is_navigational());
    }
}
