//! Record routes: paged listing of the configured source statement.

use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use serde::Serialize;

use crate::errors::{ApiResponse, AppError};
use crate::models::pagination::{PageQuery, PagedRows};
use crate::services::engine;
use crate::routes::pagination::TotalRowsQuery;
use crate::services::source::PagedQuery;
use crate::AppState;

/// Statements that list one page of the source in the configured dialect.
#[derive(Debug, Serialize)]
pub struct SqlPreview {
    pub dialect: String,
    pub count_sql: String,
    pub limited_sql: String,
}

/// GET /api/v1/records: one page of source rows with its pagination plan.
pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<ApiResponse<PagedRows<serde_json::Value>>>, AppError> {
    let config = page.to_config(&state.config.pagination_defaults());
    let result = PagedQuery::new(state.config.source_sql.as_str())
        .paginate(&state.db, &config)
        .await?;
    Ok(ApiResponse::success(result))
}

/// GET /api/v1/records/links: summary line and navigation bar for the source rows.
pub async fn links(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let config = page.to_config(&state.config.pagination_defaults());
    let total_rows = PagedQuery::new(state.config.source_sql.as_str())
        .count(&state.db)
        .await?;
    let plan = engine::plan(&config, total_rows);

    let mut html = state.render.render_summary(&plan.summary);
    html.push_str(&state.render.render_links(&plan.state, &plan.links));
    Ok(Html(html))
}

/// GET /api/v1/records/sql: count and page statements for a caller-supplied row count.
pub async fn sql(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(rows): Query<TotalRowsQuery>,
) -> Result<Json<ApiResponse<SqlPreview>>, AppError> {
    let total_rows = rows.total_rows()?;
    let config = page.to_config(&state.config.pagination_defaults());
    let pagination = engine::derive(&config, total_rows);
    let query = PagedQuery::new(state.config.source_sql.as_str());
    Ok(ApiResponse::success(SqlPreview {
        dialect: state.config.dialect.to_string(),
        count_sql: query.count_sql(),
        limited_sql: query.limited_sql(&pagination, state.config.dialect),
    }))
}
