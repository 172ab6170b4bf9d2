pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use sqlx::PgPool;

use crate::services::renderer::RenderConfig;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: config::AppConfig,
    /// Renderer settings, fixed for the life of the process.
    pub render: Arc<RenderConfig>,
}

impl AppState {
    pub fn new(db: PgPool, config: config::AppConfig) -> Self {
        let render = Arc::new(config.render_config());
        Self { db, config, render }
    }
}
