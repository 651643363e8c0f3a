use async_trait::async_trait;

use crate::{db::error::DbResult, models::LogSettings};

#[async_trait]
pub trait LogSettingsRepo: Send + Sync {
    /// Load the singleton settings record.
    ///
    /// Returns `DbError::NotFound` if the record was never seeded.
    async fn get(&self) -> DbResult<LogSettings>;

    /// Overwrite the singleton settings record, including the recipient list.
    async fn save(&self, settings: &LogSettings) -> DbResult<()>;
}
