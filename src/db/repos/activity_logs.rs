use async_trait::async_trait;

use crate::db::error::DbResult;

/// Retention window applied when none is configured.
pub const DEFAULT_ACTIVITY_LOG_DAYS: u32 = 90;

#[async_trait]
pub trait ActivityLogs: Send + Sync {
    /// Delete activity logs created more than `older_than_days` days ago.
    ///
    /// Zero falls back to [`DEFAULT_ACTIVITY_LOG_DAYS`].
    /// Returns the number of records deleted.
    async fn clear_activity_logs(&self, older_than_days: u32) -> DbResult<u64>;
}
