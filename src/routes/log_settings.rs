use axum::{Json, extract::State};

use super::ApiError;
use crate::{AppState, models::LogSettings};

/// `GET /api/v1/log-settings`
pub async fn get(State(state): State<AppState>) -> Result<Json<LogSettings>, ApiError> {
    let settings = state.services.log_settings.get().await?;
    Ok(Json(settings))
}

/// `PUT /api/v1/log-settings`
///
/// Replaces the settings, including the full recipient list.
pub async fn update(
    State(state): State<AppState>,
    Json(settings): Json<LogSettings>,
) -> Result<Json<LogSettings>, ApiError> {
    let settings = state.services.log_settings.update(settings).await?;
    Ok(Json(settings))
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use serde_json::json;

    use crate::routes::test_support::{get_json, send_json, test_app};

    #[tokio::test]
    async fn test_get_returns_seeded_defaults() {
        let (app, _pool) = test_app().await;

        let (status, body) = get_json(&app, "/api/v1/log-settings").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "clear_error_log_after_days": 30,
                "clear_activity_log_after_days": 90,
                "clear_email_queue_after_days": 30,
                "users_to_notify": [],
            })
        );
    }

    #[tokio::test]
    async fn test_put_persists_settings() {
        let (app, _pool) = test_app().await;
        let settings = json!({
            "clear_error_log_after_days": 7,
            "clear_activity_log_after_days": 14,
            "clear_email_queue_after_days": 3,
            "users_to_notify": ["bob", "alice"],
        });

        let (status, body) =
            send_json(&app, "PUT", "/api/v1/log-settings", Some(settings.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, settings);

        let (_, stored) = get_json(&app, "/api/v1/log-settings").await;
        assert_eq!(stored, settings);
    }

    #[tokio::test]
    async fn test_put_rejects_blank_recipient() {
        let (app, _pool) = test_app().await;
        let settings = json!({ "users_to_notify": ["alice", " "] });

        let (status, body) = send_json(&app, "PUT", "/api/v1/log-settings", Some(settings)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "validation_error");
    }

    #[tokio::test]
    async fn test_put_rejects_window_beyond_limit() {
        let (app, _pool) = test_app().await;
        let settings = json!({ "clear_error_log_after_days": 4294967295u64 });

        let (status, body) = send_json(&app, "PUT", "/api/v1/log-settings", Some(settings)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "validation_error");
        assert!(
            body["error"]["message"]
                .as_str()
                .unwrap()
                .contains("clear_error_log_after_days")
        );

        // Stored settings are untouched
        let (_, stored) = get_json(&app, "/api/v1/log-settings").await;
        assert_eq!(stored["clear_error_log_after_days"], 30);
    }

    #[tokio::test]
    async fn test_put_accepts_window_at_limit() {
        let (app, _pool) = test_app().await;
        let settings = json!({ "clear_activity_log_after_days": 36500 });

        let (status, body) = send_json(&app, "PUT", "/api/v1/log-settings", Some(settings)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["clear_activity_log_after_days"], 36500);
    }

    #[tokio::test]
    async fn test_put_rejects_negative_days() {
        let (app, _pool) = test_app().await;
        let settings = json!({ "clear_error_log_after_days": -1 });

        let (status, _) = send_json(&app, "PUT", "/api/v1/log-settings", Some(settings)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
