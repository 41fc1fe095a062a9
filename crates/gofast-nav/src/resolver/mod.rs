//! Symbol reference resolution.

mod perf;
mod rank;

use std::{sync::Arc, time::Instant};

pub use perf::PerfSnapshot;
use perf::{NavigationPerf, ResolveOutcome};
pub use rank::{MatchTier, pick_candidate};
use tracing::debug;

use crate::{
    document::DocumentCache,
    error::{NavigationError, Result},
    navigation::{NavigationTarget, TextPosition},
    paths,
    symbols::SymbolIndex,
};

/// Turns a symbol reference into a [`NavigationTarget`], preloading the
/// target document when it lives in another file.
pub struct ReferenceResolver {
    index: Arc<SymbolIndex>,
    documents: Arc<DocumentCache>,
    perf: NavigationPerf,
}

impl ReferenceResolver {
    pub fn new(
        index: Arc<SymbolIndex>,
        documents: Arc<DocumentCache>,
    ) -> Self {
        Self {
            index,
            documents,
            perf: NavigationPerf::default(),
        }
    }

    pub fn index(&self) -> &Arc<SymbolIndex> {
        &self.index
    }

    pub fn documents(&self) -> &Arc<DocumentCache> {
        &self.documents
    }

    pub fn perf_snapshot(&self) -> PerfSnapshot {
        self.perf.snapshot()
    }

    pub fn log_perf_summary(&self) {
        self.perf.log_summary();
    }

    /// Ranking only: no document loading. Deterministic for a given snapshot.
    pub fn rank(
        &self,
        symbol_name: &str,
        origin_path: &str,
    ) -> Option<(NavigationTarget, MatchTier)> {
        let candidates = self.index.lookup(symbol_name);
        pick_candidate(&candidates, origin_path)
            .map(|(entry, tier)| (NavigationTarget::from_entry(entry, symbol_name), tier))
    }

    /// Resolve `symbol_name` as referenced from `origin_path`.
    pub async fn try_resolve(
        &self,
        symbol_name: &str,
        origin_path: &str,
        origin_position: TextPosition,
    ) -> Result<NavigationTarget> {
        let started = Instant::now();
        let result = self.try_resolve_inner(symbol_name, origin_path, origin_position).await;
        let outcome = match &result {
            Ok((_, outcome)) => *outcome,
            Err(NavigationError::ContentUnavailable {
                ..
            }) => ResolveOutcome::ContentUnavailable,
            Err(_) => ResolveOutcome::NoCandidate,
        };
        self.perf.record(started.elapsed(), outcome);
        result.map(|(target, _)| target)
    }

    async fn try_resolve_inner(
        &self,
        symbol_name: &str,
        origin_path: &str,
        origin_position: TextPosition,
    ) -> Result<(NavigationTarget, ResolveOutcome)> {
        let Some((target, tier)) = self.rank(symbol_name, origin_path) else {
            debug!(
                "[resolve] {symbol_name} at {origin_path}:{}:{} -> no candidate",
                origin_position.line, origin_position.column
            );
            return Err(NavigationError::NoCandidate {
                name: symbol_name.to_string(),
            });
        };

        let same_document = paths::same_location(&target.path, origin_path);
        let mut cache_hit = true;
        if !same_document {
            cache_hit = self.documents.contains(&target.path);
            self.documents.ensure(&target.path).await?;
        }

        debug!(
            "[resolve] {symbol_name} at {origin_path}:{}:{} -> {}:{}:{} ({tier:?})",
            origin_position.line, origin_position.column, target.path, target.line, target.character
        );
        Ok((
            target,
            ResolveOutcome::Resolved {
                same_document,
                cache_hit,
            },
        ))
    }

    /// Like [`try_resolve`](Self::try_resolve) but every failure collapses to
    /// `None`, which tells the host to run its default lookup.
    pub async fn resolve(
        &self,
        symbol_name: &str,
        origin_path: &str,
        origin_position: TextPosition,
    ) -> Option<NavigationTarget> {
        self.try_resolve(symbol_name, origin_path, origin_position).await.ok()
    }
}

#[cfg(test)]
#[path = "../../tests/src/resolver/resolver_tests.rs"]
mod tests;
