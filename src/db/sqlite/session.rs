use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tokio::sync::{Mutex, MutexGuard};

use super::{activity_logs, common, email_queue};
use crate::{
    db::{
        error::{DbError, DbResult},
        repos::{ActivityLogs, CleanupSession, EmailQueue, Repository},
    },
    models::{ErrorLog, Filter, Record},
};

/// Cleanup session over a single SQLite transaction.
///
/// The transaction is begun lazily on first use. [`CleanupSession::commit`]
/// commits it and returns the connection to the pool; the next operation begins
/// a new one. Dropping the session without [`finish`](Self::finish) rolls back
/// whatever has not been committed.
pub struct SqliteSession {
    pool: SqlitePool,
    tx: Mutex<Option<Transaction<'static, Sqlite>>>,
}

impl SqliteSession {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            tx: Mutex::new(None),
        }
    }

    /// Commit any outstanding work and close the session.
    pub async fn finish(self) -> DbResult<()> {
        if let Some(tx) = self.tx.into_inner() {
            tx.commit().await?;
        }
        Ok(())
    }

    async fn transaction(&self) -> DbResult<MutexGuard<'_, Option<Transaction<'static, Sqlite>>>> {
        let mut guard = self.tx.lock().await;
        if guard.is_none() {
            *guard = Some(self.pool.begin().await?);
        }
        Ok(guard)
    }
}

fn open<'a>(
    tx: &'a mut Option<Transaction<'static, Sqlite>>,
) -> DbResult<&'a mut Transaction<'static, Sqlite>> {
    tx.as_mut()
        .ok_or_else(|| DbError::Internal("Cleanup session has no open transaction".into()))
}

#[async_trait]
impl<R: Record> Repository<R> for SqliteSession {
    async fn delete_where(&self, filter: &Filter) -> DbResult<u64> {
        let mut guard = self.transaction().await?;
        let tx = open(&mut guard)?;
        common::delete_where::<R, _>(&mut **tx, filter).await
    }

    async fn exists_where(&self, filter: &Filter, limit: u32) -> DbResult<bool> {
        let mut guard = self.transaction().await?;
        let tx = open(&mut guard)?;
        common::exists_where::<R, _>(&mut **tx, filter, limit).await
    }
}

#[async_trait]
impl EmailQueue for SqliteSession {
    async fn clear_outbox(&self, older_than_days: u32) -> DbResult<u64> {
        let mut guard = self.transaction().await?;
        let tx = open(&mut guard)?;
        email_queue::clear_outbox(tx, older_than_days).await
    }
}

#[async_trait]
impl ActivityLogs for SqliteSession {
    async fn clear_activity_logs(&self, older_than_days: u32) -> DbResult<u64> {
        let mut guard = self.transaction().await?;
        let tx = open(&mut guard)?;
        activity_logs::clear_activity_logs(tx, older_than_days).await
    }
}

#[async_trait]
impl CleanupSession for SqliteSession {
    fn error_logs(&self) -> &dyn Repository<ErrorLog> {
        self
    }

    fn email_queue(&self) -> &dyn EmailQueue {
        self
    }

    fn activity_logs(&self) -> &dyn ActivityLogs {
        self
    }

    async fn commit(&self) -> DbResult<()> {
        let tx = self.tx.lock().await.take();
        if let Some(tx) = tx {
            tx.commit().await?;
            tracing::debug!("Committed cleanup session");
        }
        Ok(())
    }
}
