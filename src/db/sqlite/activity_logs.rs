use sqlx::SqliteConnection;

use super::common;
use crate::{
    db::{error::DbResult, repos::DEFAULT_ACTIVITY_LOG_DAYS},
    models::{ActivityLog, Filter},
};

pub(super) async fn clear_activity_logs(
    conn: &mut SqliteConnection,
    older_than_days: u32,
) -> DbResult<u64> {
    let days = common::days_or_default(older_than_days, DEFAULT_ACTIVITY_LOG_DAYS);
    common::delete_where::<ActivityLog, _>(conn, &Filter::older_than_days(days)).await
}
