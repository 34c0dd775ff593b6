//! Reconciliation counters for the address cache.
//!
//! `CacheStats` records how many upstream events changed the cache and how many were ignored
//! because they were already reflected (duplicate inserts, unchanged updates, deletes of absent
//! rows). A steady trickle of ignored events is normal: each of the model's own writes reaches the
//! cache twice, once as the wallet's echo and once directly.

use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Entries loaded by the last full refresh
    pub loaded: usize,
    /// Number of full refreshes
    pub refreshes: usize,
    pub inserted: usize,
    pub updated: usize,
    pub removed: usize,
    /// Events that left the cache untouched
    pub ignored: usize,
}

impl CacheStats {
    pub fn record_refresh(&mut self, loaded: usize) {
        self.loaded = loaded;
        self.refreshes += 1;
    }

    pub fn record_insert(&mut self) {
        self.inserted += 1;
    }

    pub fn record_update(&mut self) {
        self.updated += 1;
    }

    pub fn record_remove(&mut self) {
        self.removed += 1;
    }

    pub fn record_ignored(&mut self) {
        self.ignored += 1;
    }

    /// Total events that went through `apply_event`
    pub fn events_seen(&self) -> usize {
        self.inserted + self.updated + self.removed + self.ignored
    }

    pub fn log(&self) {
        info!("Address cache: {}", self.summary());
    }

    /// Get a human-readable summary of the counters
    pub fn summary(&self) -> String {
        format!(
            "{} loaded over {} refreshes, {} events: {} inserted, {} updated, {} removed{}",
            self.loaded,
            self.refreshes,
            self.events_seen(),
            self.inserted,
            self.updated,
            self.removed,
            if self.ignored == 0 {
                String::new()
            } else {
                format!(" ({} ignored)", self.ignored)
            }
        )
    }
}
