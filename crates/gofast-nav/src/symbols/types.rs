use serde::{Deserialize, Serialize};

use crate::error::BackendError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SymbolKind {
    Function,
    Method,
    Struct,
    Variable,
    Constant,
    #[default]
    #[serde(other)]
    Other,
}

/// One known declaration site.
///
/// `line` and `character` are 1-based, `character` counting UTF-16 units
/// like the editor's columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub name: String,
    #[serde(default)]
    pub kind: SymbolKind,
    pub path: String,
    pub line: u32,
    pub character: u32,
}

impl SymbolEntry {
    pub fn new(
        name: impl Into<String>,
        kind: SymbolKind,
        path: impl Into<String>,
        line: u32,
        character: u32,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            path: path.into(),
            line: line.max(1),
            character: character.max(1),
        }
    }

    /// Decode the backend's list-symbols payload (a JSON array).
    pub fn parse_list(payload: &str) -> Result<Vec<SymbolEntry>, BackendError> {
        let mut entries: Vec<SymbolEntry> = serde_json::from_str(payload)?;
        for entry in &mut entries {
            entry.line = entry.line.max(1);
            entry.character = entry.character.max(1);
        }
        Ok(entries)
    }
}
