use std::path::{Path, PathBuf};

use futures::{FutureExt, future::BoxFuture};

use crate::{
    backend::SymbolSource,
    error::BackendError,
    symbols::SymbolEntry,
};

/// Symbols from a saved list-symbols payload, the JSON array the editor
/// backend serves. Re-read on every listing, so replacing the file is
/// picked up by the next refresh.
#[derive(Debug, Clone)]
pub struct SymbolListFile {
    path: PathBuf,
}

impl SymbolListFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SymbolSource for SymbolListFile {
    fn list_symbols(&self) -> BoxFuture<'_, Result<Vec<SymbolEntry>, BackendError>> {
        async move {
            let payload = tokio::fs::read_to_string(&self.path).await.map_err(|source| BackendError::Io {
                path: self.path.clone(),
                source,
            })?;
            SymbolEntry::parse_list(&payload)
        }
        .boxed()
    }
}

#[cfg(test)]
#[path = "../../tests/src/backend/json_tests.rs"]
mod tests;
