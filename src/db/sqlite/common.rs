//! Query builders shared by the pool-backed repositories and the cleanup session.

use sqlx::{Sqlite, query::Query, sqlite::SqliteArguments};

use crate::{
    db::error::{DbError, DbResult},
    models::{Filter, Record},
};

/// Render the `WHERE` predicate for a validated filter.
fn predicate<R: Record>(filter: &Filter) -> DbResult<String> {
    filter.validate_for::<R>().map_err(DbError::Validation)?;
    Ok(match filter {
        Filter::CreatedBefore(_) => format!("{} < ?", R::CREATED_COLUMN),
        Filter::Flag { column, .. } => format!("{} = ?", column),
    })
}

fn bind_filter<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    filter: &Filter,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match filter {
        Filter::CreatedBefore(cutoff) => query.bind(*cutoff),
        Filter::Flag { value, .. } => query.bind(*value),
    }
}

pub(super) async fn delete_where<'e, R, E>(executor: E, filter: &Filter) -> DbResult<u64>
where
    R: Record,
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let sql = format!("DELETE FROM {} WHERE {}", R::TABLE, predicate::<R>(filter)?);
    let result = bind_filter(sqlx::query(&sql), filter)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub(super) async fn exists_where<'e, R, E>(
    executor: E,
    filter: &Filter,
    limit: u32,
) -> DbResult<bool>
where
    R: Record,
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "SELECT 1 FROM {} WHERE {} LIMIT ?",
        R::TABLE,
        predicate::<R>(filter)?
    );
    let rows = bind_filter(sqlx::query(&sql), filter)
        .bind(i64::from(limit.max(1)))
        .fetch_all(executor)
        .await?;
    Ok(!rows.is_empty())
}

/// Convert a stored day count back into the model's unsigned type.
pub(super) fn days_from_db(value: i64, column: &str) -> DbResult<u32> {
    u32::try_from(value).map_err(|_| {
        DbError::Internal(format!("Invalid value {} in log_settings.{}", value, column))
    })
}

/// Apply a zero-means-default retention window.
pub(super) fn days_or_default(days: u32, default: u32) -> u32 {
    if days == 0 { default } else { days }
}
