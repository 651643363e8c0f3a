use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::common;
use crate::{
    db::{error::DbResult, repos::Repository},
    models::{Filter, Record},
};

/// Pool-backed repository for any record kind. Each call runs in its own
/// implicit transaction.
pub struct SqliteRecordRepo<R> {
    pool: SqlitePool,
    _kind: PhantomData<fn() -> R>,
}

impl<R: Record> SqliteRecordRepo<R> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _kind: PhantomData,
        }
    }
}

#[async_trait]
impl<R: Record> Repository<R> for SqliteRecordRepo<R> {
    async fn delete_where(&self, filter: &Filter) -> DbResult<u64> {
        common::delete_where::<R, _>(&self.pool, filter).await
    }

    async fn exists_where(&self, filter: &Filter, limit: u32) -> DbResult<bool> {
        common::exists_where::<R, _>(&self.pool, filter, limit).await
    }
}
