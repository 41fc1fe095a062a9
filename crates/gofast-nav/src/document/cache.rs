use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use dashmap::{DashMap, mapref::entry::Entry};
use tracing::{debug, warn};

use super::DocumentModel;
use crate::{
    backend::FileStore,
    error::{NavigationError, Result},
    paths,
};

/// Lazily loaded document models, at most one per normalized path.
///
/// `DashMap` keeps every operation safe from any task without external
/// locking. Once registered, a model lives for the rest of the session.
pub struct DocumentCache {
    store: Arc<dyn FileStore>,
    models: DashMap<String, Arc<DocumentModel>>,
    fetches: AtomicU64,
}

impl DocumentCache {
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self {
            store,
            models: DashMap::new(),
            fetches: AtomicU64::new(0),
        }
    }

    pub fn contains(
        &self,
        path: &str,
    ) -> bool {
        self.models.contains_key(&paths::normalize(path))
    }

    pub fn get(
        &self,
        path: &str,
    ) -> Option<Arc<DocumentModel>> {
        self.models.get(&paths::normalize(path)).map(|r| Arc::clone(r.value()))
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Backend reads issued so far, including ones whose result was dropped.
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::Relaxed)
    }

    /// Register content the host already has (e.g. a file opened from the
    /// explorer). An existing model for the same location wins.
    pub fn register(
        &self,
        path: &str,
        content: String,
    ) -> Arc<DocumentModel> {
        self.install(path, content)
    }

    /// Return the model for `path`, reading it from the backend on first use.
    ///
    /// Two callers racing on the same unseen path may both read it; only the
    /// first to register keeps its model and both receive that one.
    pub async fn ensure(
        &self,
        path: &str,
    ) -> Result<Arc<DocumentModel>> {
        if let Some(model) = self.get(path) {
            return Ok(model);
        }

        self.fetches.fetch_add(1, Ordering::Relaxed);
        let content = self.store.read_file(path).await.map_err(|source| {
            warn!("[documents] failed to load {path}: {source}");
            NavigationError::ContentUnavailable {
                path: path.to_string(),
                source,
            }
        })?;

        Ok(self.install(path, content))
    }

    fn install(
        &self,
        path: &str,
        content: String,
    ) -> Arc<DocumentModel> {
        match self.models.entry(paths::normalize(path)) {
            Entry::Occupied(existing) => {
                debug!("[documents] {path} registered meanwhile, discarding duplicate load");
                Arc::clone(existing.get())
            },
            Entry::Vacant(slot) => {
                debug!("[documents] registered {path} ({} bytes)", content.len());
                Arc::clone(slot.insert(Arc::new(DocumentModel::new(path, content))).value())
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src/document/cache_tests.rs"]
mod tests;
