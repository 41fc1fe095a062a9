use serde::Serialize;

use crate::symbols::SymbolEntry;

/// A 1-based line/column position, as the editor widget addresses text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TextPosition {
    pub line: u32,
    pub column: u32,
}

impl TextPosition {
    pub const fn new(
        line: u32,
        column: u32,
    ) -> Self {
        Self {
            line,
            column,
        }
    }
}

impl Default for TextPosition {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct TextRange {
    pub start: TextPosition,
    pub end: TextPosition,
}

impl TextRange {
    pub const fn new(
        start: TextPosition,
        end: TextPosition,
    ) -> Self {
        Self {
            start,
            end,
        }
    }
}

/// A fully resolved jump destination.
///
/// `length` is the length of the symbol name so the caller can select the
/// exact occurrence, in UTF-16 units like the editor columns. Link targets
/// use a length of zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NavigationTarget {
    pub path: String,
    pub line: u32,
    pub character: u32,
    pub length: u32,
}

impl NavigationTarget {
    pub fn new(
        path: impl Into<String>,
        line: u32,
        character: u32,
        length: u32,
    ) -> Self {
        Self {
            path: path.into(),
            line,
            character,
            length,
        }
    }

    pub fn from_entry(
        entry: &SymbolEntry,
        symbol_name: &str,
    ) -> Self {
        Self::new(entry.path.clone(), entry.line, entry.character, symbol_name.encode_utf16().count() as u32)
    }

    /// Start of the file.
    pub fn file_start(path: impl Into<String>) -> Self {
        Self::new(path, 1, 1, 0)
    }

    pub fn position(&self) -> TextPosition {
        TextPosition::new(self.line, self.character)
    }

    pub fn selection(&self) -> TextRange {
        TextRange::new(self.position(), TextPosition::new(self.line, self.character.saturating_add(self.length)))
    }
}

/// A jump waiting for its document to become active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingJump {
    pub path: String,
    pub selection: TextRange,
}

#[cfg(test)]
#[path = "../../tests/src/navigation/types_tests.rs"]
mod tests;
