use std::{
    sync::{
        Arc, RwLock,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::{sync::Mutex, task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::{
    backend::SymbolSource,
    error::{NavigationError, Result},
    symbols::types::SymbolEntry,
};

/// Project-wide declaration index.
///
/// Holds one immutable snapshot of every [`SymbolEntry`] the backend reported
/// on its last successful listing. A refresh swaps the whole snapshot in one
/// step, so a reader sees either the old sequence or the new one, never a mix.
pub struct SymbolIndex {
    snapshot: RwLock<Arc<[SymbolEntry]>>,
    generation: AtomicU64,
    /// Held from fetch to swap so refreshes install in the order they start.
    refresh_lock: Mutex<()>,
}

impl Default for SymbolIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::from(Vec::new())),
            generation: AtomicU64::new(0),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn with_entries(entries: Vec<SymbolEntry>) -> Self {
        let index = Self::new();
        index.replace(entries);
        index
    }

    /// The current snapshot. Cheap; clones an `Arc`.
    pub fn snapshot(&self) -> Arc<[SymbolEntry]> {
        self.snapshot.read().map(|guard| Arc::clone(&guard)).unwrap_or_else(|_| Arc::from(Vec::new()))
    }

    /// Number of successful refreshes (and direct replacements) so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries named `name`, in index order.
    pub fn lookup(
        &self,
        name: &str,
    ) -> Vec<SymbolEntry> {
        self.snapshot().iter().filter(|entry| entry.name == name).cloned().collect()
    }

    /// Install a new snapshot wholesale and return its generation.
    pub fn replace(
        &self,
        entries: Vec<SymbolEntry>,
    ) -> u64 {
        let next: Arc<[SymbolEntry]> = Arc::from(entries);
        if let Ok(mut guard) = self.snapshot.write() {
            *guard = next;
        }
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Fetch the full symbol set and swap it in.
    ///
    /// On failure the previous snapshot stays in place. Overlapping calls
    /// queue up, so a slow earlier fetch never overwrites a later one.
    pub async fn try_refresh(
        &self,
        source: &dyn SymbolSource,
    ) -> Result<usize> {
        let _serialized = self.refresh_lock.lock().await;
        let entries = source.list_symbols().await.map_err(NavigationError::IndexUnavailable)?;
        let count = entries.len();
        let generation = self.replace(entries);
        info!("[symbol-index] indexed {count} symbols (generation {generation})");
        Ok(count)
    }

    /// Like [`try_refresh`](Self::try_refresh), but a failure is only logged.
    pub async fn refresh(
        &self,
        source: &dyn SymbolSource,
    ) {
        if let Err(error) = self.try_refresh(source).await {
            warn!("[symbol-index] refresh failed, keeping {} cached symbols: {error}", self.len());
        }
    }

    /// Refresh now, then every `interval`, until the returned task is aborted.
    pub fn spawn_refresh_loop(
        self: &Arc<Self>,
        source: Arc<dyn SymbolSource>,
        interval: Duration,
    ) -> JoinHandle<()> {
        let index = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                // The first tick completes immediately.
                ticker.tick().await;
                debug!("[symbol-index] refresh tick");
                index.refresh(source.as_ref()).await;
            }
        })
    }
}

#[cfg(test)]
#[path = "../../tests/src/symbols/index_tests.rs"]
mod tests;
