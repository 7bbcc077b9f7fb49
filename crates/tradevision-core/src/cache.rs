//! Snapshot cache for the orchestration layer.
//!
//! The core functions are pure; this cache only spares a presentation layer
//! from recomputing the snapshot it is already displaying. Entries are keyed
//! by everything that influences the output, and are dropped when the user
//! switches symbol, refreshes, or a live tick replaces the series.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::{ChartSnapshot, CoreError, IndicatorParams, Interval, Symbol};

/// How a lookup should treat existing entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheMode {
    /// Serve a cached snapshot when present, otherwise build and store one.
    #[default]
    Use,
    /// Always rebuild and overwrite the stored snapshot.
    Refresh,
    /// Always rebuild and leave the cache untouched.
    Bypass,
}

/// Everything that determines a snapshot's contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnapshotKey {
    pub symbol: Symbol,
    pub point_count: usize,
    pub seed: u64,
    pub interval: Interval,
    pub params: IndicatorParams,
}

#[derive(Debug, Default)]
struct CacheInner {
    map: HashMap<SnapshotKey, Arc<ChartSnapshot>>,
}

/// Thread-safe in-memory snapshot cache.
#[derive(Debug, Clone, Default)]
pub struct SeriesCache {
    inner: Arc<RwLock<CacheInner>>,
}

impl SeriesCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &SnapshotKey) -> Option<Arc<ChartSnapshot>> {
        let store = self.inner.read().await;
        store.map.get(key).cloned()
    }

    pub async fn put(&self, key: SnapshotKey, snapshot: Arc<ChartSnapshot>) {
        let mut store = self.inner.write().await;
        store.map.insert(key, snapshot);
    }

    /// Look up `key`, building the snapshot with `build` on a miss.
    ///
    /// Returns the snapshot and whether it came from the cache.
    pub async fn get_or_build<F>(
        &self,
        key: SnapshotKey,
        mode: CacheMode,
        build: F,
    ) -> Result<(Arc<ChartSnapshot>, bool), CoreError>
    where
        F: FnOnce(&SnapshotKey) -> Result<ChartSnapshot, CoreError>,
    {
        if mode == CacheMode::Use {
            if let Some(hit) = self.get(&key).await {
                debug!(symbol = %key.symbol, "snapshot cache hit");
                return Ok((hit, true));
            }
        }

        debug!(symbol = %key.symbol, ?mode, "snapshot cache miss");
        let snapshot = Arc::new(build(&key)?);
        if mode != CacheMode::Bypass {
            self.put(key, Arc::clone(&snapshot)).await;
        }
        Ok((snapshot, false))
    }

    /// Drop every entry for `symbol`; returns how many were removed.
    pub async fn invalidate(&self, symbol: &Symbol) -> usize {
        let mut store = self.inner.write().await;
        let before = store.map.len();
        store.map.retain(|key, _| &key.symbol != symbol);
        before - store.map.len()
    }

    pub async fn len(&self) -> usize {
        let store = self.inner.read().await;
        store.map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
