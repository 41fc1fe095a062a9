use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use tracing::info;

/// How a single resolve request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResolveOutcome {
    Resolved {
        same_document: bool,
        cache_hit: bool,
    },
    NoCandidate,
    ContentUnavailable,
}

/// Counters for resolve requests. Logged every 200 requests.
#[derive(Default)]
pub(crate) struct NavigationPerf {
    requests: AtomicU64,
    resolved: AtomicU64,
    no_candidate: AtomicU64,
    content_unavailable: AtomicU64,
    same_document: AtomicU64,
    cache_hits: AtomicU64,
    total_elapsed_ns: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PerfSnapshot {
    pub requests: u64,
    pub resolved: u64,
    pub no_candidate: u64,
    pub content_unavailable: u64,
    pub same_document: u64,
    pub cache_hits: u64,
}

impl NavigationPerf {
    pub(crate) fn record(
        &self,
        elapsed: Duration,
        outcome: ResolveOutcome,
    ) {
        let requests = self.requests.fetch_add(1, Ordering::Relaxed) + 1;

        match outcome {
            ResolveOutcome::Resolved {
                same_document,
                cache_hit,
            } => {
                self.resolved.fetch_add(1, Ordering::Relaxed);
                if same_document {
                    self.same_document.fetch_add(1, Ordering::Relaxed);
                }
                if cache_hit {
                    self.cache_hits.fetch_add(1, Ordering::Relaxed);
                }
            },
            ResolveOutcome::NoCandidate => {
                self.no_candidate.fetch_add(1, Ordering::Relaxed);
            },
            ResolveOutcome::ContentUnavailable => {
                self.content_unavailable.fetch_add(1, Ordering::Relaxed);
            },
        }

        let elapsed_ns = elapsed.as_nanos().min(u64::MAX as u128) as u64;
        self.total_elapsed_ns.fetch_add(elapsed_ns, Ordering::Relaxed);

        if requests % 200 == 0 {
            self.log_summary();
        }
    }

    pub(crate) fn snapshot(&self) -> PerfSnapshot {
        PerfSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            resolved: self.resolved.load(Ordering::Relaxed),
            no_candidate: self.no_candidate.load(Ordering::Relaxed),
            content_unavailable: self.content_unavailable.load(Ordering::Relaxed),
            same_document: self.same_document.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn log_summary(&self) {
        let snapshot = self.snapshot();
        if snapshot.requests == 0 {
            info!("[perf][resolve] no requests recorded yet");
            return;
        }

        let total_elapsed_ns = self.total_elapsed_ns.load(Ordering::Relaxed);
        let avg_ms = total_elapsed_ns as f64 / snapshot.requests as f64 / 1_000_000.0;

        info!(
            "[perf][resolve] requests={}, resolved={}, no_candidate={}, content_unavailable={}, \
             same_document={}, cache_hits={}, avg_ms={avg_ms:.2}",
            snapshot.requests,
            snapshot.resolved,
            snapshot.no_candidate,
            snapshot.content_unavailable,
            snapshot.same_document,
            snapshot.cache_hits,
        );
    }
}
