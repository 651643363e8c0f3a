//! Log cleanup scheduling configuration.
//!
//! The retention windows themselves live in the `log_settings` record so they
//! can be changed at runtime; this section only controls when cleanup runs.
//!
//! # Example
//!
//! ```toml
//! [retention]
//! enabled = true
//! interval_hours = 24
//! ```

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Scheduling for the background log cleanup worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetentionConfig {
    /// Whether the background cleanup worker runs.
    /// Default: true
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// How often to run the cleanup (in hours).
    /// Default: 24 (once per day)
    #[serde(default = "default_interval_hours")]
    pub interval_hours: u64,

    /// Run a cleanup immediately at startup instead of waiting one interval.
    #[serde(default = "default_enabled")]
    pub run_on_startup: bool,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            interval_hours: default_interval_hours(),
            run_on_startup: default_enabled(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_interval_hours() -> u64 {
    24
}

impl RetentionConfig {
    /// Get the interval as a Duration.
    pub fn interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.interval_hours.saturating_mul(3600))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.interval_hours == 0 {
            return Err(ConfigError::Validation(
                "retention.interval_hours must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
