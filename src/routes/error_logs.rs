use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use super::ApiError;
use crate::{
    AppState,
    models::{UnseenErrorAlert, UserRef},
};

#[derive(Debug, Deserialize)]
pub struct UnseenQuery {
    pub user: String,
}

/// `GET /api/v1/error-logs/unseen?user=<id>`
///
/// Responds with `null` when there are no unseen error logs.
pub async fn unseen(
    State(state): State<AppState>,
    Query(query): Query<UnseenQuery>,
) -> Result<Json<Option<UnseenErrorAlert>>, ApiError> {
    if query.user.trim().is_empty() {
        return Err(ApiError::Validation("user must not be empty".to_string()));
    }

    let alert = state
        .services
        .unseen_errors
        .has_unseen_error_log(&UserRef::new(query.user))
        .await?;

    Ok(Json(alert))
}
