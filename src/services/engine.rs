//! Pagination engine: page clamping, offsets, link windows and skip levels.
//!
//! Every function here is pure. Anomalous input is absorbed into a well-defined state
//! instead of being reported as an error.

use crate::models::pagination::{
    LinkDescriptor, LinkKind, PaginationConfig, PaginationPlan, PaginationState, ResultSummary,
    DEFAULT_ADJACENT, DEFAULT_PER_PAGE, MAX_ADJACENT, MAX_PER_PAGE,
};

/// `(threshold, jump)` pairs in ascending threshold order. Pages up to `threshold`
/// get skip links of size `jump`.
const SKIP_LEVELS: &[(i64, i64)] = &[(100, 10), (1000, 75), (5000, 250), (10000, 500)];

/// Skip jump size for `current_page`, or `None` past the last threshold.
pub fn skip_level(current_page: i64) -> Option<i64> {
    SKIP_LEVELS
        .iter()
        .find(|(threshold, _)| current_page <= *threshold)
        .map(|&(_, jump)| jump)
}

fn bounded_or_default(value: i64, default: i64, max: i64, field: &'static str) -> i64 {
    if value <= 0 {
        tracing::debug!(field, value, default, "Non-positive pagination setting replaced");
        default
    } else if value > max {
        tracing::debug!(field, value, max, "Oversized pagination setting capped");
        max
    } else {
        value
    }
}

/// Derive the full pagination state for `total_rows` rows.
pub fn derive(config: &PaginationConfig, total_rows: i64) -> PaginationState {
    let per_page = bounded_or_default(config.per_page, DEFAULT_PER_PAGE, MAX_PER_PAGE, "per_page");
    let adjacent = bounded_or_default(config.adjacent, DEFAULT_ADJACENT, MAX_ADJACENT, "adjacent");
    let total_rows = total_rows.max(0);

    let total_pages = total_rows / per_page + i64::from(total_rows % per_page != 0);
    let requested = if config.requested_page < 1 {
        1
    } else {
        config.requested_page
    };
    let current_page = requested.min(total_pages.max(1));
    if current_page != config.requested_page {
        tracing::debug!(
            requested = config.requested_page,
            current_page,
            total_pages,
            "Requested page clamped"
        );
    }

    let offset = ((current_page - 1) * per_page).max(0);
    let left_window = adjacent.min(current_page - 1);
    let right_window = adjacent.min(total_pages - current_page).max(0);

    PaginationState {
        total_rows,
        per_page,
        adjacent,
        requested_page: config.requested_page,
        total_pages,
        current_page,
        offset,
        left_window,
        right_window,
        skip_level: skip_level(current_page),
    }
}

/// Zero-based row offset and row limit selecting exactly the current page.
pub fn offset_and_limit(state: &PaginationState) -> (i64, i64) {
    (state.offset, state.per_page)
}

/// Human-facing "from - to of total" values.
pub fn result_summary(state: &PaginationState) -> ResultSummary {
    let total = state.total_rows;
    if total == 0 {
        return ResultSummary {
            from: 0,
            to: 0,
            total: 0,
        };
    }

    let page = state.current_page;
    let to = if page == 1 {
        total.min(state.per_page)
    } else if page == state.total_pages {
        total
    } else {
        page * state.per_page
    };

    ResultSummary {
        from: (page - 1) * state.per_page + 1,
        to,
        total,
    }
}

/// Ordered navigation elements for the current page.
///
/// Each boundary element is gated independently of the others. `next` and `last`
/// stop one page early: on the last two pages neither is emitted.
pub fn link_sequence(state: &PaginationState) -> Vec<LinkDescriptor> {
    if state.total_pages == 0 {
        return Vec::new();
    }

    let page = state.current_page;
    let total_pages = state.total_pages;
    let mut links = Vec::new();

    if page > 2 {
        links.push(LinkDescriptor::link(LinkKind::First, 1));
    }

    if let Some(skip) = state.skip_level {
        if page - 1 > skip {
            links.push(LinkDescriptor::link(LinkKind::SkipLeft, page - skip));
        }
    }

    if page > 2 {
        links.push(LinkDescriptor::link(LinkKind::Prev, page - 1));
    } else {
        links.push(LinkDescriptor::disabled(LinkKind::Prev));
    }

    for p in (page - state.left_window)..=(page + state.right_window) {
        if p == page {
            links.push(LinkDescriptor::current(p));
        } else {
            links.push(LinkDescriptor::link(LinkKind::Page, p));
        }
    }

    let has_next = page < total_pages - 1;
    if has_next {
        links.push(LinkDescriptor::link(LinkKind::Next, page + 1));
    } else {
        links.push(LinkDescriptor::disabled(LinkKind::Next));
    }

    if let Some(skip) = state.skip_level {
        if total_pages - page > skip {
            links.push(LinkDescriptor::link(LinkKind::SkipRight, page + skip));
        }
    }

    if has_next {
        links.push(LinkDescriptor::link(LinkKind::Last, total_pages));
    }

    links
}

/// Derive the state and every value computed from it in one go.
pub fn plan(config: &PaginationConfig, total_rows: i64) -> PaginationPlan {
    let state = derive(config, total_rows);
    let (offset, limit) = offset_and_limit(&state);
    PaginationPlan {
        summary: result_summary(&state),
        links: link_sequence(&state),
        state,
        offset,
        limit,
    }
}
