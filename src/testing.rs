//! In-memory fakes of the store traits for exercising the core operations
//! without a database.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::{
    db::{ActivityLogs, CleanupSession, DbError, DbResult, EmailQueue, LogSettingsRepo, Repository},
    models::{ErrorLog, Filter, LogSettings},
};

/// Settings store keeping one record in memory and counting reads.
#[derive(Default)]
pub struct InMemorySettingsRepo {
    settings: Mutex<LogSettings>,
    reads: AtomicUsize,
}

impl InMemorySettingsRepo {
    pub fn with(settings: LogSettings) -> Self {
        Self {
            settings: Mutex::new(settings),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LogSettingsRepo for InMemorySettingsRepo {
    async fn get(&self) -> DbResult<LogSettings> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.settings.lock().clone())
    }

    async fn save(&self, settings: &LogSettings) -> DbResult<()> {
        *self.settings.lock() = settings.clone();
        Ok(())
    }
}

/// One call observed by a [`RecordingSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    ClearOutbox(u32),
    Commit,
    DeleteErrorLogs(Filter),
    ClearActivityLogs(u32),
}

/// Session recording every call in order.
///
/// Each kind holds a number of "qualifying" records that the next delete
/// removes, so repeated runs observe idempotence.
#[derive(Default)]
pub struct RecordingSession {
    steps: Mutex<Vec<Step>>,
    pub pending_emails: AtomicU64,
    pub pending_error_logs: AtomicU64,
    pub pending_activity_logs: AtomicU64,
    pub unseen_error_logs: AtomicBool,
    fail_on: Mutex<Option<&'static str>>,
}

impl RecordingSession {
    pub fn with_pending(emails: u64, error_logs: u64, activity_logs: u64) -> Self {
        let session = Self::default();
        session.pending_emails.store(emails, Ordering::SeqCst);
        session.pending_error_logs.store(error_logs, Ordering::SeqCst);
        session
            .pending_activity_logs
            .store(activity_logs, Ordering::SeqCst);
        session
    }

    pub fn with_unseen(unseen: bool) -> Self {
        let session = Self::default();
        session.unseen_error_logs.store(unseen, Ordering::SeqCst);
        session
    }

    /// Make the named step (`clear_outbox`, `commit`, `delete_error_logs`,
    /// `clear_activity_logs` or `exists_error_logs`) fail.
    pub fn fail_on(&self, step: &'static str) {
        *self.fail_on.lock() = Some(step);
    }

    pub fn steps(&self) -> Vec<Step> {
        self.steps.lock().clone()
    }

    fn check(&self, step: &'static str) -> DbResult<()> {
        if *self.fail_on.lock() == Some(step) {
            return Err(DbError::Internal(format!("injected failure in {}", step)));
        }
        Ok(())
    }
}

#[async_trait]
impl Repository<ErrorLog> for RecordingSession {
    async fn delete_where(&self, filter: &Filter) -> DbResult<u64> {
        self.check("delete_error_logs")?;
        self.steps.lock().push(Step::DeleteErrorLogs(filter.clone()));
        Ok(self.pending_error_logs.swap(0, Ordering::SeqCst))
    }

    async fn exists_where(&self, _filter: &Filter, _limit: u32) -> DbResult<bool> {
        self.check("exists_error_logs")?;
        Ok(self.unseen_error_logs.load(Ordering::SeqCst))
    }
}

#[async_trait]
impl EmailQueue for RecordingSession {
    async fn clear_outbox(&self, older_than_days: u32) -> DbResult<u64> {
        self.check("clear_outbox")?;
        self.steps.lock().push(Step::ClearOutbox(older_than_days));
        Ok(self.pending_emails.swap(0, Ordering::SeqCst))
    }
}

#[async_trait]
impl ActivityLogs for RecordingSession {
    async fn clear_activity_logs(&self, older_than_days: u32) -> DbResult<u64> {
        self.check("clear_activity_logs")?;
        self.steps
            .lock()
            .push(Step::ClearActivityLogs(older_than_days));
        Ok(self.pending_activity_logs.swap(0, Ordering::SeqCst))
    }
}

#[async_trait]
impl CleanupSession for RecordingSession {
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
        self.check("commit")?;
        self.steps.lock().push(Step::Commit);
        Ok(())
    }
}
