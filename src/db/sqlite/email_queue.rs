use sqlx::SqliteConnection;

use super::common;
use crate::{
    db::{error::DbResult, repos::DEFAULT_OUTBOX_DAYS},
    models::{EmailQueueEntry, Filter},
};

pub(super) async fn clear_outbox(
    conn: &mut SqliteConnection,
    older_than_days: u32,
) -> DbResult<u64> {
    let days = common::days_or_default(older_than_days, DEFAULT_OUTBOX_DAYS);
    let deleted =
        common::delete_where::<EmailQueueEntry, _>(&mut *conn, &Filter::older_than_days(days))
            .await?;

    // Recipients have no foreign key; sweep whatever the delete orphaned.
    let orphans = sqlx::query(
        r#"
        DELETE FROM email_queue_recipients
        WHERE queue_id NOT IN (SELECT id FROM email_queue)
        "#,
    )
    .execute(&mut *conn)
    .await?
    .rows_affected();

    if orphans > 0 {
        tracing::debug!(recipients = orphans, "Deleted orphaned email queue recipients");
    }

    Ok(deleted)
}
