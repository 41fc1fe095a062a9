pub mod backend;
pub mod config;
pub mod document;
pub mod error;
pub mod links;
pub mod navigation;
pub mod navigator;
pub mod paths;
pub mod resolver;
pub mod symbols;

pub use backend::{FileStore, LocalWorkspace, PathResolver, SymbolListFile, SymbolSource};
pub use config::NavigatorSettings;
pub use document::{DocumentCache, DocumentModel};
pub use error::{BackendError, ConfigError, NavigationError};
pub use navigation::{
    ControllerState, EditorHost, JumpOutcome, NavigationController, NavigationTarget, PendingJump, TextPosition,
    TextRange,
};
pub use navigator::{NavigationOutcome, NavigationRequest, Navigator};
pub use resolver::{MatchTier, ReferenceResolver};
pub use symbols::{SymbolEntry, SymbolIndex, SymbolKind};
