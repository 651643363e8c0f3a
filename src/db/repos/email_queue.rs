use async_trait::async_trait;

use crate::db::error::DbResult;

/// Retention window applied when none is configured.
pub const DEFAULT_OUTBOX_DAYS: u32 = 31;

#[async_trait]
pub trait EmailQueue: Send + Sync {
    /// Delete queued emails not modified for more than `older_than_days` days,
    /// together with their recipient rows.
    ///
    /// Zero falls back to [`DEFAULT_OUTBOX_DAYS`].
    /// Returns the number of queue entries deleted.
    async fn clear_outbox(&self, older_than_days: u32) -> DbResult<u64>;
}
