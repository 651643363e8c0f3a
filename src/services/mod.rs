mod log_settings;
mod unseen_errors;

use std::sync::Arc;

pub use log_settings::LogSettingsService;
pub use unseen_errors::UnseenErrorNotifier;

use crate::{cache::SettingsCache, config::NotifierConfig, db::DbPool};

/// Services shared by the HTTP handlers and the CLI.
#[derive(Clone)]
pub struct Services {
    pub log_settings: LogSettingsService,
    pub unseen_errors: UnseenErrorNotifier,
}

impl Services {
    pub fn new(db: Arc<DbPool>, notifier: &NotifierConfig) -> Self {
        let cache = Arc::new(SettingsCache::new(
            db.log_settings(),
            notifier.settings_cache_ttl(),
        ));
        Self {
            log_settings: LogSettingsService::new(db.log_settings(), Arc::clone(&cache)),
            unseen_errors: UnseenErrorNotifier::new(
                db.error_logs(),
                cache,
                notifier.error_log_list_url.clone(),
            ),
        }
    }
}
