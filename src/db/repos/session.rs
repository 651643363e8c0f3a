use async_trait::async_trait;

use super::{ActivityLogs, EmailQueue, Repository};
use crate::{db::error::DbResult, models::ErrorLog};

/// A unit of work spanning the steps of a cleanup run.
///
/// Work done through the session becomes durable on [`commit`](Self::commit).
/// Committing releases any locks the session holds; later operations continue
/// in a fresh unit of work.
#[async_trait]
pub trait CleanupSession: Send + Sync {
    fn error_logs(&self) -> &dyn Repository<ErrorLog>;

    fn email_queue(&self) -> &dyn EmailQueue;

    fn activity_logs(&self) -> &dyn ActivityLogs;

    async fn commit(&self) -> DbResult<()>;
}
