use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};

use parking_lot::RwLock;

use crate::{
    db::{DbResult, LogSettingsRepo},
    models::LogSettings,
};

struct CacheEntry {
    settings: Arc<LogSettings>,
    loaded_at: Instant,
}

/// Read-through cache of the singleton log settings.
///
/// Entries are served until `ttl` elapses or [`invalidate`](Self::invalidate)
/// is called. Every settings write must invalidate. A load that races with an
/// invalidation is returned to its caller but not cached.
pub struct SettingsCache {
    repo: Arc<dyn LogSettingsRepo>,
    ttl: Duration,
    entry: RwLock<Option<CacheEntry>>,
    generation: AtomicU64,
}

impl SettingsCache {
    pub fn new(repo: Arc<dyn LogSettingsRepo>, ttl: Duration) -> Self {
        Self {
            repo,
            ttl,
            entry: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Return the cached settings, loading them from the store on a miss.
    pub async fn get(&self) -> DbResult<Arc<LogSettings>> {
        if let Some(settings) = self.cached() {
            return Ok(settings);
        }

        let generation = self.generation.load(Ordering::Acquire);
        let settings = Arc::new(self.repo.get().await?);

        let mut entry = self.entry.write();
        if self.generation.load(Ordering::Acquire) == generation {
            *entry = Some(CacheEntry {
                settings: Arc::clone(&settings),
                loaded_at: Instant::now(),
            });
        }
        Ok(settings)
    }

    /// Drop the cached copy so the next read goes to the store.
    pub fn invalidate(&self) {
        let mut entry = self.entry.write();
        self.generation.fetch_add(1, Ordering::AcqRel);
        *entry = None;
    }

    fn cached(&self) -> Option<Arc<LogSettings>> {
        self.entry
            .read()
            .as_ref()
            .filter(|e| e.loaded_at.elapsed() < self.ttl)
            .map(|e| Arc::clone(&e.settings))
    }
}
