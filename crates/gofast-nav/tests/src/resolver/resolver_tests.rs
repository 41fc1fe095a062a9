use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
};

use futures::{FutureExt, future::BoxFuture};

use super::*;
use crate::{
    backend::FileStore,
    error::BackendError,
    symbols::{SymbolEntry, SymbolKind},
};

struct MemoryStore {
    files: HashMap<String, String>,
    reads: AtomicU64,
}

impl FileStore for MemoryStore {
    fn read_file<'a>(
        &'a self,
        path: &'a str,
    ) -> BoxFuture<'a, std::result::Result<String, BackendError>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let found = self.files.get(path).cloned();
        async move {
            found.ok_or_else(|| BackendError::Io {
                path: path.into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            })
        }
        .boxed()
    }
}

fn fixture(
    entries: Vec<SymbolEntry>,
    files: &[&str],
) -> (ReferenceResolver, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore {
        files: files.iter().map(|p| (p.to_string(), format!("// {p}\n"))).collect(),
        reads: AtomicU64::new(0),
    });
    let index = Arc::new(SymbolIndex::with_entries(entries));
    let documents = Arc::new(DocumentCache::new(store.clone()));
    (ReferenceResolver::new(index, documents), store)
}

fn sample_entries() -> Vec<SymbolEntry> {
    vec![
        SymbolEntry::new("Handle", SymbolKind::Function, "a/x.go", 1, 1),
        SymbolEntry::new("Handle", SymbolKind::Function, "a/y.go", 2, 1),
        SymbolEntry::new("Handle", SymbolKind::Function, "b/z.go", 3, 1),
    ]
}

const ORIGIN: TextPosition = TextPosition::new(10, 4);

#[tokio::test]
async fn unknown_symbol_resolves_to_none() {
    let (resolver, store) = fixture(sample_entries(), &["a/x.go"]);

    assert!(resolver.resolve("Nope", "a/x.go", ORIGIN).await.is_none());
    let err = resolver.try_resolve("Nope", "a/x.go", ORIGIN).await.expect_err("no candidate");
    assert!(matches!(err, NavigationError::NoCandidate { ref name } if name == "Nope"));
    assert_eq!(store.reads.load(Ordering::SeqCst), 0);
    assert_eq!(resolver.perf_snapshot().no_candidate, 2);
}

#[tokio::test]
async fn same_file_target_needs_no_document_load() {
    let (resolver, store) = fixture(sample_entries(), &[]);

    let target = resolver.resolve("Handle", "a/x.go", ORIGIN).await.expect("resolved");
    assert_eq!(target, NavigationTarget::new("a/x.go", 1, 1, 6));
    assert_eq!(store.reads.load(Ordering::SeqCst), 0);
    assert!(resolver.documents().is_empty());
}

#[tokio::test]
async fn cross_file_target_is_preloaded() {
    let entries = vec![
        SymbolEntry::new("Handle", SymbolKind::Function, "b/z.go", 3, 6),
        SymbolEntry::new("Handle", SymbolKind::Function, "a/y.go", 2, 7),
    ];
    let (resolver, store) = fixture(entries, &["a/y.go", "b/z.go"]);

    let target = resolver.resolve("Handle", "a/q.go", ORIGIN).await.expect("resolved");
    assert_eq!(target, NavigationTarget::new("a/y.go", 2, 7, 6));
    assert!(resolver.documents().contains("a/y.go"));
    assert!(!resolver.documents().contains("b/z.go"));

    resolver.resolve("Handle", "a/q.go", ORIGIN).await.expect("resolved again");
    assert_eq!(store.reads.load(Ordering::SeqCst), 1);
    let perf = resolver.perf_snapshot();
    assert_eq!(perf.resolved, 2);
    assert_eq!(perf.cache_hits, 1);
}

#[tokio::test]
async fn unreadable_target_degrades_to_none() {
    let (resolver, _) = fixture(sample_entries(), &[]);

    assert!(resolver.resolve("Handle", "c/other.go", ORIGIN).await.is_none());
    let err = resolver.try_resolve("Handle", "c/other.go", ORIGIN).await.expect_err("read fails");
    assert!(matches!(err, NavigationError::ContentUnavailable { ref path, .. } if path == "a/x.go"));
    assert_eq!(resolver.perf_snapshot().content_unavailable, 2);
}

#[test]
fn ranking_is_deterministic_for_a_snapshot() {
    let (resolver, _) = fixture(sample_entries(), &[]);
    let first = resolver.rank("Handle", "c/other.go");
    for _ in 0..5 {
        assert_eq!(resolver.rank("Handle", "c/other.go"), first);
    }
    assert_eq!(first, Some((NavigationTarget::new("a/x.go", 1, 1, 6), MatchTier::Fallback)));
}

#[test]
fn target_length_counts_utf16_units() {
    let (resolver, _) =
        fixture(vec![SymbolEntry::new("Größe", SymbolKind::Variable, "de/werte.go", 4, 5)], &["de/werte.go"]);
    let (target, _) = resolver.rank("Größe", "de/werte.go").expect("ranked");
    assert_eq!(target.length, 5);
    assert_eq!(target.selection().end.column, 10);
}
