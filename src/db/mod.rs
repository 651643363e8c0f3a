mod error;
pub mod repos;
pub mod sqlite;

#[cfg(test)]
pub mod tests;

use std::sync::Arc;

pub use error::{DbError, DbResult};
pub use repos::*;

use crate::{config::DatabaseConfig, models::ErrorLog};

/// Cached repository trait objects, created once at startup.
struct CachedRepos {
    error_logs: Arc<dyn Repository<ErrorLog>>,
    log_settings: Arc<dyn LogSettingsRepo>,
}

/// SQLite-backed record store.
///
/// Repositories are cached at construction time to avoid allocation on each access.
pub struct DbPool {
    pool: sqlx::SqlitePool,
    repos: CachedRepos,
}

impl DbPool {
    /// Create a DbPool from an existing SQLite pool.
    /// Primarily useful for testing.
    pub fn from_sqlite(pool: sqlx::SqlitePool) -> Self {
        let repos = CachedRepos {
            error_logs: Arc::new(sqlite::SqliteRecordRepo::<ErrorLog>::new(pool.clone())),
            log_settings: Arc::new(sqlite::SqliteLogSettingsRepo::new(pool.clone())),
        };
        DbPool { pool, repos }
    }

    /// Connect using the given configuration, running migrations if enabled.
    pub async fn from_config(config: &DatabaseConfig) -> DbResult<Self> {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(
                sqlx::sqlite::SqliteConnectOptions::new()
                    .filename(&config.path)
                    .create_if_missing(config.create_if_missing)
                    .journal_mode(if config.wal_mode {
                        sqlx::sqlite::SqliteJournalMode::Wal
                    } else {
                        sqlx::sqlite::SqliteJournalMode::Delete
                    })
                    .busy_timeout(std::time::Duration::from_millis(config.busy_timeout_ms)),
            )
            .await?;

        let db = Self::from_sqlite(pool);
        if config.run_migrations {
            db.run_migrations().await?;
        }
        Ok(db)
    }

    pub async fn run_migrations(&self) -> DbResult<()> {
        tracing::info!("Running SQLite migrations");
        sqlx::migrate!("./migrations_sqlx/sqlite")
            .run(&self.pool)
            .await?;
        tracing::info!("SQLite migrations completed successfully");
        Ok(())
    }

    /// Get the error log repository
    pub fn error_logs(&self) -> Arc<dyn Repository<ErrorLog>> {
        Arc::clone(&self.repos.error_logs)
    }

    /// Get the log settings repository
    pub fn log_settings(&self) -> Arc<dyn LogSettingsRepo> {
        Arc::clone(&self.repos.log_settings)
    }

    /// Open a unit of work for a cleanup run.
    pub fn begin_cleanup(&self) -> sqlite::SqliteSession {
        sqlite::SqliteSession::new(self.pool.clone())
    }

    /// Underlying pool, for direct queries.
    pub fn pool(&self) -> &sqlx::SqlitePool {
        &self.pool
    }

    pub async fn health_check(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
