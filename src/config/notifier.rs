use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::DEFAULT_ERROR_LOG_LIST_URL;

/// Unseen error-log notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotifierConfig {
    /// Link placed in the alert message.
    #[serde(default = "default_error_log_list_url")]
    pub error_log_list_url: String,

    /// How long a cached copy of the log settings is served before re-reading.
    /// Writes through the settings API invalidate the cache immediately.
    /// Set to 0 to read through on every check.
    #[serde(default = "default_settings_cache_ttl")]
    pub settings_cache_ttl_secs: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            error_log_list_url: default_error_log_list_url(),
            settings_cache_ttl_secs: default_settings_cache_ttl(),
        }
    }
}

fn default_error_log_list_url() -> String {
    DEFAULT_ERROR_LOG_LIST_URL.to_string()
}

fn default_settings_cache_ttl() -> u64 {
    300
}

impl NotifierConfig {
    pub fn settings_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.settings_cache_ttl_secs)
    }
}
