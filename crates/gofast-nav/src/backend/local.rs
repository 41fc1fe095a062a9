use std::path::{Component, Path, PathBuf};

use futures::{FutureExt, future::BoxFuture};
use tracing::debug;

use crate::{
    backend::{FileStore, PathResolver, SymbolSource},
    error::BackendError,
    symbols::{ScanOptions, SymbolEntry, scan_workspace},
};

/// Suffixes tried, in order, when resolving a path reference.
pub const RESOLVE_SUFFIXES: &[&str] =
    &["", ".go", ".ts", ".tsx", ".js", ".jsx", ".json", "/index.go", "/index.ts", "/index.tsx", "/index.js"];

const ROOT_ALIAS: &str = "@/";

/// File-system backed implementation of every backend contract.
#[derive(Debug, Clone)]
pub struct LocalWorkspace {
    root: PathBuf,
    scan_options: ScanOptions,
}

impl LocalWorkspace {
    pub fn new(
        root: impl Into<PathBuf>,
        scan_options: ScanOptions,
    ) -> Self {
        Self {
            root: root.into(),
            scan_options,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Blocking resolution; see [`PathResolver::resolve_path`].
    pub fn resolve_path_blocking(
        &self,
        base: &str,
        reference: &str,
    ) -> Result<String, BackendError> {
        let dir = Path::new(base).parent().unwrap_or_else(|| Path::new(""));

        let resolved = if reference.starts_with('.') {
            first_existing(&dir.join(reference))
        } else if let Some(rest) = reference.strip_prefix(ROOT_ALIAS) {
            first_existing(&self.root.join(rest)).or_else(|| first_existing(&self.root.join("src").join(rest)))
        } else {
            first_existing(&dir.join(reference)).or_else(|| first_existing(&self.root.join(reference)))
        };

        match resolved {
            Some(path) => {
                debug!("[workspace] {reference} from {base} -> {}", path.display());
                Ok(path.display().to_string())
            },
            None => Err(BackendError::NotFound {
                base: base.to_string(),
                reference: reference.to_string(),
            }),
        }
    }
}

fn first_existing(candidate: &Path) -> Option<PathBuf> {
    let cleaned = clean_path(candidate);
    let stem = cleaned.as_os_str().to_string_lossy();
    RESOLVE_SUFFIXES.iter().map(|suffix| PathBuf::from(format!("{stem}{suffix}"))).find(|path| path.is_file())
}

/// Lexically drop `.` components and fold `..` into its parent.
fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                if matches!(out.components().next_back(), None | Some(Component::ParentDir)) {
                    out.push("..");
                } else {
                    out.pop();
                }
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

impl SymbolSource for LocalWorkspace {
    fn list_symbols(&self) -> BoxFuture<'_, Result<Vec<SymbolEntry>, BackendError>> {
        let root = self.root.clone();
        let options = self.scan_options.clone();
        async move {
            if !root.is_dir() {
                return Err(BackendError::Io {
                    path: root,
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "workspace root is not a directory"),
                });
            }
            tokio::task::spawn_blocking(move || scan_workspace(&root, &options))
                .await
                .map_err(|error| BackendError::Task(error.to_string()))
        }
        .boxed()
    }
}

impl FileStore for LocalWorkspace {
    fn read_file<'a>(
        &'a self,
        path: &'a str,
    ) -> BoxFuture<'a, Result<String, BackendError>> {
        async move {
            tokio::fs::read_to_string(path).await.map_err(|source| BackendError::Io {
                path: PathBuf::from(path),
                source,
            })
        }
        .boxed()
    }
}

impl PathResolver for LocalWorkspace {
    fn resolve_path<'a>(
        &'a self,
        base: &'a str,
        reference: &'a str,
    ) -> BoxFuture<'a, Result<String, BackendError>> {
        async move { self.resolve_path_blocking(base, reference) }.boxed()
    }
}

#[cfg(test)]
#[path = "../../tests/src/backend/local_tests.rs"]
mod tests;
