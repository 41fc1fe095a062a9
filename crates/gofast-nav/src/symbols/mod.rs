mod index;
pub(crate) mod scanner;
mod types;

pub use index::SymbolIndex;
pub use scanner::{ScanOptions, scan_source, scan_workspace};
pub use types::{SymbolEntry, SymbolKind};
