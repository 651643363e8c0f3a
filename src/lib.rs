//! Retention-driven cleanup of error logs, activity logs and queued emails,
//! plus the unseen error-log alert check.

pub mod cache;
pub mod config;
pub mod db;
pub mod models;
pub mod observability;
pub mod retention;
pub mod routes;
pub mod services;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{config::AppConfig, db::DbPool, services::Services};

/// Shared state handed to every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub services: Services,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Connect to the configured database and build the services.
    pub async fn new(config: AppConfig) -> Result<Self, db::DbError> {
        let db = Arc::new(DbPool::from_config(&config.database).await?);
        Ok(Self::with_db(db, config))
    }

    /// Build the state around an already connected store.
    pub fn with_db(db: Arc<DbPool>, config: AppConfig) -> Self {
        let services = Services::new(Arc::clone(&db), &config.notifier);
        Self {
            db,
            services,
            config: Arc::new(config),
        }
    }
}

/// Build the HTTP router.
pub fn build_app(config: &AppConfig, state: AppState) -> Router {
    let mut app = Router::new().route("/health", get(routes::health::health_check));

    if config.observability.metrics.enabled {
        app = app.route("/metrics", get(routes::health::metrics));
    }

    app.nest("/api/v1", routes::get_api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
