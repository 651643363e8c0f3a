pub mod error;
pub mod error_logs;
pub mod health;
pub mod log_settings;

use axum::{Router, routing::get};

pub use error::{ApiError, ErrorResponse};

use crate::AppState;

/// Routes mounted under `/api/v1`.
pub fn get_api_routes() -> Router<AppState> {
    Router::new()
        .route("/error-logs/unseen", get(error_logs::unseen))
        .route(
            "/log-settings",
            get(log_settings::get).put(log_settings::update),
        )
}
