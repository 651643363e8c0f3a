use serde::{Deserialize, Serialize};

/// Identifier of an application user.
///
/// Only ever compared for equality against the requesting user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRef(String);

impl UserRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Longest accepted retention window, in days (100 years).
pub const MAX_RETENTION_DAYS: u32 = 36_500;

/// The singleton log retention settings record.
///
/// Exactly one row exists in the store; it is seeded by the initial migration
/// and only ever updated, never created or deleted at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSettings {
    /// Error logs older than this many days are deleted.
    #[serde(default = "default_clear_error_log_after_days")]
    pub clear_error_log_after_days: u32,
    /// Activity logs older than this many days are deleted.
    #[serde(default = "default_clear_activity_log_after_days")]
    pub clear_activity_log_after_days: u32,
    /// Queued emails not modified for this many days are deleted.
    #[serde(default = "default_clear_email_queue_after_days")]
    pub clear_email_queue_after_days: u32,
    /// Users alerted about unseen error logs. Empty means everyone.
    #[serde(default)]
    pub users_to_notify: Vec<UserRef>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            clear_error_log_after_days: default_clear_error_log_after_days(),
            clear_activity_log_after_days: default_clear_activity_log_after_days(),
            clear_email_queue_after_days: default_clear_email_queue_after_days(),
            users_to_notify: Vec::new(),
        }
    }
}

fn default_clear_error_log_after_days() -> u32 {
    30
}

fn default_clear_activity_log_after_days() -> u32 {
    90
}

fn default_clear_email_queue_after_days() -> u32 {
    30
}

impl LogSettings {
    /// Whether `user` is an explicitly configured alert recipient.
    pub fn is_recipient(&self, user: &UserRef) -> bool {
        self.users_to_notify.contains(user)
    }

    /// Check the settings before they are persisted.
    pub fn validate(&self) -> Result<(), String> {
        for (field, days) in [
            ("clear_error_log_after_days", self.clear_error_log_after_days),
            ("clear_activity_log_after_days", self.clear_activity_log_after_days),
            ("clear_email_queue_after_days", self.clear_email_queue_after_days),
        ] {
            if days > MAX_RETENTION_DAYS {
                return Err(format!(
                    "{} must be at most {} days",
                    field, MAX_RETENTION_DAYS
                ));
            }
        }

        if let Some(pos) = self
            .users_to_notify
            .iter()
            .position(|u| u.as_str().trim().is_empty())
        {
            return Err(format!("users_to_notify[{}] must not be empty", pos));
        }
        Ok(())
    }
}
