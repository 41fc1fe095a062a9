use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by one of the storage / symbol backends.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot resolve {reference:?} relative to {base}")]
    NotFound {
        base: String,
        reference: String,
    },
    #[error("malformed backend payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("backend task failed: {0}")]
    Task(String),
}

/// Why a navigation did not happen.
///
/// None of these are fatal to the host; every variant means "leave the
/// cursor where it is" and let the default behaviour run.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("symbol index unavailable: {0}")]
    IndexUnavailable(#[source] BackendError),
    #[error("content unavailable for {path}: {source}")]
    ContentUnavailable {
        path: String,
        #[source]
        source: BackendError,
    },
    #[error("no declaration known for `{name}`")]
    NoCandidate {
        name: String,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T, E = NavigationError> = std::result::Result<T, E>;
