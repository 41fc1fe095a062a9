//! Contracts the navigation core expects from the storage backend.
//!
//! The browser host talks to these over HTTP; the CLI and the tests use
//! [`LocalWorkspace`], which serves them straight from the file system.

mod json;
mod local;

use futures::future::BoxFuture;
pub use json::SymbolListFile;
pub use local::{LocalWorkspace, RESOLVE_SUFFIXES};

use crate::{error::BackendError, symbols::SymbolEntry};

/// Lists every declaration in the project. No pagination: each call returns
/// the complete current set.
pub trait SymbolSource: Send + Sync {
    fn list_symbols(&self) -> BoxFuture<'_, Result<Vec<SymbolEntry>, BackendError>>;
}

/// Reads a file's full text.
pub trait FileStore: Send + Sync {
    fn read_file<'a>(
        &'a self,
        path: &'a str,
    ) -> BoxFuture<'a, Result<String, BackendError>>;
}

/// Turns a reference written inside `base` (an import string, a quoted
/// relative path) into a concrete file path.
pub trait PathResolver: Send + Sync {
    fn resolve_path<'a>(
        &'a self,
        base: &'a str,
        reference: &'a str,
    ) -> BoxFuture<'a, Result<String, BackendError>>;
}
