//! Pagination planning routes: compute the plan or the navigation markup for a row count.

use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use serde::Deserialize;

use crate::errors::{ApiResponse, AppError};
use crate::models::pagination::{PageQuery, PaginationPlan};
use crate::services::engine;
use crate::AppState;

/// Row count supplied by a caller that ran the query itself.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TotalRowsQuery {
    pub total_rows: Option<String>,
}

impl TotalRowsQuery {
    /// The row count, which unlike the page parameters is required and must be valid.
    pub fn total_rows(&self) -> Result<i64, AppError> {
        let raw = self
            .total_rows
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Validation("total_rows is required".to_string()))?;
        let total: i64 = raw.parse().map_err(|_| {
            AppError::Validation(format!("total_rows must be an integer, got {raw:?}"))
        })?;
        if total < 0 {
            return Err(AppError::Validation(
                "total_rows must not be negative".to_string(),
            ));
        }
        Ok(total)
    }
}

/// GET /api/v1/pagination/plan: pagination state, summary and links for a row count.
pub async fn plan(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(rows): Query<TotalRowsQuery>,
) -> Result<Json<ApiResponse<PaginationPlan>>, AppError> {
    let total_rows = rows.total_rows()?;
    let config = page.to_config(&state.config.pagination_defaults());
    Ok(ApiResponse::success(engine::plan(&config, total_rows)))
}

/// GET /api/v1/pagination/links: navigation bar markup for a row count.
pub async fn links(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(rows): Query<TotalRowsQuery>,
) -> Result<Html<String>, AppError> {
    let total_rows = rows.total_rows()?;
    let config = page.to_config(&state.config.pagination_defaults());
    let plan = engine::plan(&config, total_rows);
    Ok(Html(state.render.render_links(&plan.state, &plan.links)))
}
