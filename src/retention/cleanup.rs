use serde::Serialize;

use crate::{
    db::{CleanupSession, DbPool, DbResult},
    models::{Filter, LogSettings},
    observability::metrics,
};

/// Results from a single cleanup pass.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupRunResult {
    /// Number of queued emails deleted.
    pub email_queue_deleted: u64,
    /// Number of error logs deleted.
    pub error_logs_deleted: u64,
    /// Number of activity logs deleted.
    pub activity_logs_deleted: u64,
}

impl CleanupRunResult {
    /// Total number of records deleted across all kinds.
    pub fn total(&self) -> u64 {
        self.email_queue_deleted + self.error_logs_deleted + self.activity_logs_deleted
    }

    /// Check if any records were deleted.
    pub fn has_deletions(&self) -> bool {
        self.total() > 0
    }
}

/// Delete logs older than the retention windows in `settings`.
///
/// Runs email queue, error log and activity log deletion in that order. With
/// `commit_between_steps`, the session is committed once after the email queue
/// step so the following deletes start without its locks. The first failure is
/// returned and the remaining steps are skipped.
pub async fn clear_logs(
    settings: &LogSettings,
    session: &dyn CleanupSession,
    commit_between_steps: bool,
) -> DbResult<CleanupRunResult> {
    let mut result = CleanupRunResult::default();

    result.email_queue_deleted = session
        .email_queue()
        .clear_outbox(settings.clear_email_queue_after_days)
        .await?;

    if commit_between_steps {
        session.commit().await?;
    }

    result.error_logs_deleted = session
        .error_logs()
        .delete_where(&Filter::older_than_days(
            settings.clear_error_log_after_days,
        ))
        .await?;

    result.activity_logs_deleted = session
        .activity_logs()
        .clear_activity_logs(settings.clear_activity_log_after_days)
        .await?;

    Ok(result)
}

/// Run one cleanup pass against the store.
///
/// Settings are read fresh, never from the notifier's cache. The pass commits
/// between steps and commits its final step before returning.
#[tracing::instrument(name = "retention.run_log_clean_up", skip(db))]
pub async fn run_log_clean_up(db: &DbPool) -> DbResult<CleanupRunResult> {
    let settings = db.log_settings().get().await?;

    tracing::debug!(
        clear_error_log_after_days = settings.clear_error_log_after_days,
        clear_activity_log_after_days = settings.clear_activity_log_after_days,
        clear_email_queue_after_days = settings.clear_email_queue_after_days,
        "Starting log cleanup"
    );

    let session = db.begin_cleanup();
    let result = clear_logs(&settings, &session, true).await?;
    session.finish().await?;

    metrics::record_log_cleanup_deletion("email_queue", result.email_queue_deleted);
    metrics::record_log_cleanup_deletion("error_log", result.error_logs_deleted);
    metrics::record_log_cleanup_deletion("activity_log", result.activity_logs_deleted);

    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use chrono::{Duration, Utc};

    use super::*;
    use crate::{
        db::{
            DbError,
            tests::{
                count, exists, insert_activity_log, insert_error_log, insert_queued_email,
                migrated_pool,
            },
        },
        models::MAX_RETENTION_DAYS,
        testing::{RecordingSession, Step},
    };

    fn settings(error: u32, activity: u32, email: u32) -> LogSettings {
        LogSettings {
            clear_error_log_after_days: error,
            clear_activity_log_after_days: activity,
            clear_email_queue_after_days: email,
            users_to_notify: Vec::new(),
        }
    }

    fn step_names(steps: &[Step]) -> Vec<&'static str> {
        steps
            .iter()
            .map(|s| match s {
                Step::ClearOutbox(_) => "email_queue",
                Step::Commit => "commit",
                Step::DeleteErrorLogs(_) => "error_log",
                Step::ClearActivityLogs(_) => "activity_log",
            })
            .collect()
    }

    #[test]
    fn test_cleanup_run_result_total() {
        let result = CleanupRunResult {
            email_queue_deleted: 5,
            error_logs_deleted: 10,
            activity_logs_deleted: 20,
        };
        assert_eq!(result.total(), 35);
        assert!(result.has_deletions());
        assert!(!CleanupRunResult::default().has_deletions());
    }

    #[tokio::test]
    async fn test_commit_between_email_queue_and_error_logs() {
        let session = RecordingSession::default();
        clear_logs(&settings(30, 90, 7), &session, true)
            .await
            .unwrap();

        assert_eq!(
            step_names(&session.steps()),
            ["email_queue", "commit", "error_log", "activity_log"]
        );
    }

    #[tokio::test]
    async fn test_no_commit_without_flag() {
        let session = RecordingSession::default();
        clear_logs(&settings(30, 90, 7), &session, false)
            .await
            .unwrap();

        assert_eq!(
            step_names(&session.steps()),
            ["email_queue", "error_log", "activity_log"]
        );
    }

    #[tokio::test]
    async fn test_thresholds_reach_each_step() {
        let session = RecordingSession::default();
        let before = Utc::now();
        clear_logs(&settings(30, 90, 7), &session, false)
            .await
            .unwrap();
        let after = Utc::now();

        let steps = session.steps();
        assert_eq!(steps[0], Step::ClearOutbox(7));
        assert_eq!(steps[2], Step::ClearActivityLogs(90));
        match &steps[1] {
            Step::DeleteErrorLogs(Filter::CreatedBefore(cutoff)) => {
                assert!(*cutoff >= before - Duration::days(30));
                assert!(*cutoff <= after - Duration::days(30));
            }
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_second_run_deletes_nothing() {
        let session = RecordingSession::with_pending(3, 2, 1);

        let first = clear_logs(&settings(30, 90, 7), &session, true)
            .await
            .unwrap();
        let second = clear_logs(&settings(30, 90, 7), &session, true)
            .await
            .unwrap();

        assert_eq!(first.total(), 6);
        assert_eq!(second, CleanupRunResult::default());
    }

    #[tokio::test]
    async fn test_failure_stops_remaining_steps() {
        let session = RecordingSession::with_pending(0, 4, 4);
        session.fail_on("delete_error_logs");

        let result = clear_logs(&settings(30, 90, 7), &session, true).await;

        assert!(matches!(result, Err(DbError::Internal(_))));
        assert_eq!(step_names(&session.steps()), ["email_queue", "commit"]);
        assert_eq!(session.pending_activity_logs.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_commit_failure_propagates() {
        let session = RecordingSession::default();
        session.fail_on("commit");

        let result = clear_logs(&settings(30, 90, 7), &session, true).await;
        assert!(result.is_err());
        assert_eq!(step_names(&session.steps()), ["email_queue"]);
    }

    #[tokio::test]
    async fn test_run_log_clean_up_against_sqlite() {
        let pool = migrated_pool().await;
        let db = DbPool::from_sqlite(pool.clone());
        db.log_settings()
            .save(&settings(30, 90, 7))
            .await
            .unwrap();

        let old_error = insert_error_log(&pool, 31, false).await;
        let recent_error = insert_error_log(&pool, 10, false).await;
        insert_activity_log(&pool, 91).await;
        insert_activity_log(&pool, 30).await;
        insert_queued_email(&pool, 8, &["a@example.com"]).await;
        insert_queued_email(&pool, 1, &["b@example.com"]).await;

        let result = run_log_clean_up(&db).await.unwrap();

        assert_eq!(
            result,
            CleanupRunResult {
                email_queue_deleted: 1,
                error_logs_deleted: 1,
                activity_logs_deleted: 1,
            }
        );
        assert!(!exists(&pool, "error_logs", &old_error).await);
        assert!(exists(&pool, "error_logs", &recent_error).await);
        assert_eq!(count(&pool, "activity_logs").await, 1);
        assert_eq!(count(&pool, "email_queue").await, 1);
        assert_eq!(count(&pool, "email_queue_recipients").await, 1);

        // Idempotent
        let again = run_log_clean_up(&db).await.unwrap();
        assert!(!again.has_deletions());
        assert_eq!(count(&pool, "error_logs").await, 1);
    }

    #[tokio::test]
    async fn test_run_log_clean_up_with_maximum_windows() {
        let pool = migrated_pool().await;
        let db = DbPool::from_sqlite(pool.clone());
        // Written straight to the store, past the API's bounds check
        db.log_settings()
            .save(&settings(u32::MAX, u32::MAX, u32::MAX))
            .await
            .unwrap();

        insert_error_log(&pool, 3650, false).await;
        insert_activity_log(&pool, 3650).await;
        insert_queued_email(&pool, 3650, &["a@example.com"]).await;

        let result = run_log_clean_up(&db).await.unwrap();

        assert!(!result.has_deletions());
        assert_eq!(count(&pool, "error_logs").await, 1);
        assert_eq!(count(&pool, "activity_logs").await, 1);
        assert_eq!(count(&pool, "email_queue").await, 1);
    }

    #[tokio::test]
    async fn test_run_log_clean_up_at_retention_limit() {
        let pool = migrated_pool().await;
        let db = DbPool::from_sqlite(pool.clone());
        db.log_settings()
            .save(&settings(MAX_RETENTION_DAYS, MAX_RETENTION_DAYS, MAX_RETENTION_DAYS))
            .await
            .unwrap();

        let ancient = insert_error_log(&pool, i64::from(MAX_RETENTION_DAYS) + 1, false).await;
        let kept = insert_error_log(&pool, 3650, false).await;

        let result = run_log_clean_up(&db).await.unwrap();

        assert_eq!(result.error_logs_deleted, 1);
        assert!(!exists(&pool, "error_logs", &ancient).await);
        assert!(exists(&pool, "error_logs", &kept).await);
    }

    #[tokio::test]
    async fn test_run_log_clean_up_with_empty_tables() {
        let pool = migrated_pool().await;
        let db = DbPool::from_sqlite(pool);

        let result = run_log_clean_up(&db).await.unwrap();
        assert_eq!(result, CleanupRunResult::default());
    }
}
