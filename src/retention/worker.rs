//! Background worker for periodic log cleanup.
//!
//! Calls [`run_log_clean_up`] on the configured interval until the shutdown
//! token is cancelled. A run is never interrupted; cancellation is only observed
//! while the worker is waiting for the next tick.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::run_log_clean_up;
use crate::{config::RetentionConfig, db::DbPool};

/// Starts the log cleanup worker as a background task.
///
/// Returns immediately if the worker is disabled. Otherwise loops until
/// `shutdown` is cancelled. Failed runs are logged and retried on the next tick.
pub async fn start_log_cleanup_worker(
    db: Arc<DbPool>,
    config: RetentionConfig,
    shutdown: CancellationToken,
) {
    if !config.enabled {
        tracing::info!("Log cleanup worker disabled by configuration");
        return;
    }

    tracing::info!(
        interval_hours = config.interval_hours,
        run_on_startup = config.run_on_startup,
        "Starting log cleanup worker"
    );

    let interval = config.interval();

    if !config.run_on_startup && !wait(interval, &shutdown).await {
        tracing::info!("Log cleanup worker stopped");
        return;
    }

    loop {
        match run_log_clean_up(&db).await {
            Ok(result) => {
                if result.has_deletions() {
                    tracing::info!(
                        email_queue = result.email_queue_deleted,
                        error_logs = result.error_logs_deleted,
                        activity_logs = result.activity_logs_deleted,
                        total = result.total(),
                        "Log cleanup complete"
                    );
                } else {
                    tracing::debug!("Log cleanup complete, no records to delete");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Error running log cleanup");
            }
        }

        if !wait(interval, &shutdown).await {
            break;
        }
    }

    tracing::info!("Log cleanup worker stopped");
}

/// Sleep for `interval`. Returns false if cancelled first.
async fn wait(interval: std::time::Duration, shutdown: &CancellationToken) -> bool {
    tokio::select! {
        _ = shutdown.cancelled() => false,
        _ = tokio::time::sleep(interval) => true,
    }
}
