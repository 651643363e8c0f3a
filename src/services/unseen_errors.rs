use std::sync::Arc;

use crate::{
    cache::SettingsCache,
    db::{DbResult, Repository},
    models::{ErrorLog, UnseenErrorAlert, UserRef},
    observability::metrics,
};

/// Decides whether a user should be alerted about unseen error logs.
#[derive(Clone)]
pub struct UnseenErrorNotifier {
    error_logs: Arc<dyn Repository<ErrorLog>>,
    settings: Arc<SettingsCache>,
    error_log_list_url: String,
}

impl UnseenErrorNotifier {
    pub fn new(
        error_logs: Arc<dyn Repository<ErrorLog>>,
        settings: Arc<SettingsCache>,
        error_log_list_url: String,
    ) -> Self {
        Self {
            error_logs,
            settings,
            error_log_list_url,
        }
    }

    /// Returns `None` when every error log has been seen.
    ///
    /// Otherwise the alert message is always built; `show_alert` is true when
    /// the recipient list is empty or contains `user`.
    #[tracing::instrument(name = "notifier.unseen_error_log", skip(self, user), fields(user = %user))]
    pub async fn has_unseen_error_log(&self, user: &UserRef) -> DbResult<Option<UnseenErrorAlert>> {
        if !self.error_logs.exists_where(&ErrorLog::unseen(), 1).await? {
            metrics::record_unseen_error_check("none");
            return Ok(None);
        }

        let settings = self.settings.get().await?;
        // An unconfigured recipient list alerts everyone.
        let show_alert = settings.users_to_notify.is_empty() || settings.is_recipient(user);

        tracing::debug!(show_alert, "Unseen error logs present");
        metrics::record_unseen_error_check(if show_alert { "alert" } else { "suppressed" });

        Ok(Some(UnseenErrorAlert::new(
            show_alert,
            &self.error_log_list_url,
        )))
    }
}
