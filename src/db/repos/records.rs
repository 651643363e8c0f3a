use async_trait::async_trait;

use crate::{
    db::error::DbResult,
    models::{Filter, Record},
};

/// Filtered bulk access to one kind of log record.
#[async_trait]
pub trait Repository<R: Record>: Send + Sync {
    /// Delete every record matching the filter.
    ///
    /// Returns the number of records deleted.
    async fn delete_where(&self, filter: &Filter) -> DbResult<u64>;

    /// Check whether at least one record matches the filter.
    ///
    /// At most `limit` rows are examined; pass 1 for a plain existence check.
    async fn exists_where(&self, filter: &Filter, limit: u32) -> DbResult<bool>;
}
