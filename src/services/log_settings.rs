use std::sync::Arc;

use crate::{
    cache::SettingsCache,
    db::{DbError, DbResult, LogSettingsRepo},
    models::LogSettings,
};

/// Administrative access to the singleton log settings.
///
/// Reads always go to the store. Writes invalidate the notifier's settings
/// cache once they are durable.
#[derive(Clone)]
pub struct LogSettingsService {
    repo: Arc<dyn LogSettingsRepo>,
    cache: Arc<SettingsCache>,
}

impl LogSettingsService {
    pub fn new(repo: Arc<dyn LogSettingsRepo>, cache: Arc<SettingsCache>) -> Self {
        Self { repo, cache }
    }

    pub async fn get(&self) -> DbResult<LogSettings> {
        self.repo.get().await
    }

    pub async fn update(&self, settings: LogSettings) -> DbResult<LogSettings> {
        settings.validate().map_err(DbError::Validation)?;
        self.repo.save(&settings).await?;
        self.cache.invalidate();

        tracing::info!(
            clear_error_log_after_days = settings.clear_error_log_after_days,
            clear_activity_log_after_days = settings.clear_activity_log_after_days,
            clear_email_queue_after_days = settings.clear_email_queue_after_days,
            users_to_notify = settings.users_to_notify.len(),
            "Log settings updated"
        );

        Ok(settings)
    }
}
