use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use super::common::days_from_db;
use crate::{
    db::{
        error::{DbError, DbResult},
        repos::LogSettingsRepo,
    },
    models::{LogSettings, UserRef},
};

pub struct SqliteLogSettingsRepo {
    pool: SqlitePool,
}

impl SqliteLogSettingsRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LogSettingsRepo for SqliteLogSettingsRepo {
    async fn get(&self) -> DbResult<LogSettings> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            SELECT clear_error_log_after_days, clear_activity_log_after_days,
                   clear_email_queue_after_days
            FROM log_settings
            WHERE id = 1
            "#,
        )
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(DbError::NotFound)?;

        let users: Vec<String> = sqlx::query_scalar(
            "SELECT user_id FROM log_settings_notify_users ORDER BY position",
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(LogSettings {
            clear_error_log_after_days: days_from_db(
                row.get("clear_error_log_after_days"),
                "clear_error_log_after_days",
            )?,
            clear_activity_log_after_days: days_from_db(
                row.get("clear_activity_log_after_days"),
                "clear_activity_log_after_days",
            )?,
            clear_email_queue_after_days: days_from_db(
                row.get("clear_email_queue_after_days"),
                "clear_email_queue_after_days",
            )?,
            users_to_notify: users.into_iter().map(UserRef::from).collect(),
        })
    }

    async fn save(&self, settings: &LogSettings) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE log_settings
            SET clear_error_log_after_days = ?,
                clear_activity_log_after_days = ?,
                clear_email_queue_after_days = ?,
                updated_at = ?
            WHERE id = 1
            "#,
        )
        .bind(i64::from(settings.clear_error_log_after_days))
        .bind(i64::from(settings.clear_activity_log_after_days))
        .bind(i64::from(settings.clear_email_queue_after_days))
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        sqlx::query("DELETE FROM log_settings_notify_users")
            .execute(&mut *tx)
            .await?;

        for (position, user) in settings.users_to_notify.iter().enumerate() {
            sqlx::query("INSERT INTO log_settings_notify_users (position, user_id) VALUES (?, ?)")
                .bind(position as i64)
                .bind(user.as_str())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
