//! Line-oriented scanner for top-level Go declarations.
//!
//! Relies on gofmt layout: top-level declarations start in column 1 and the
//! members of grouped `type ( ... )`, `var ( ... )` and `const ( ... )`
//! blocks are indented one level.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::{
    config::IndexingSettings,
    symbols::types::{SymbolEntry, SymbolKind},
};

static FUNC_DECL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^func\s+(\([^)]*\)\s*)?([\p{L}_][\p{L}\p{Nd}_]*)").expect("valid func regex"));
static TYPE_DECL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^type\s+([\p{L}_][\p{L}\p{Nd}_]*)").expect("valid type regex"));
static VALUE_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(var|const)\s+([\p{L}_][\p{L}\p{Nd}_]*(?:\s*,\s*[\p{L}_][\p{L}\p{Nd}_]*)*)").expect("valid value regex")
});
static GROUP_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(type|var|const)\s*\(\s*(?://.*)?$").expect("valid group regex"));
static GROUP_TYPE_MEMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s+([\p{L}_][\p{L}\p{Nd}_]*)").expect("valid member regex"));
static GROUP_VALUE_MEMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s+([\p{L}_][\p{L}\p{Nd}_]*(?:\s*,\s*[\p{L}_][\p{L}\p{Nd}_]*)*)").expect("valid member regex")
});
static IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}_][\p{L}\p{Nd}_]*").expect("valid ident regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    pub exclude_dirs: Vec<String>,
    pub skip_hidden: bool,
    pub extensions: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::from(&IndexingSettings::default())
    }
}

impl From<&IndexingSettings> for ScanOptions {
    fn from(settings: &IndexingSettings) -> Self {
        Self {
            exclude_dirs: settings.exclude_dirs.clone(),
            skip_hidden: settings.skip_hidden,
            extensions: settings.extensions.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    Type,
    Var,
    Const,
}

impl Group {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "type" => Some(Self::Type),
            "var" => Some(Self::Var),
            "const" => Some(Self::Const),
            _ => None,
        }
    }

    fn kind(self) -> SymbolKind {
        match self {
            Self::Type => SymbolKind::Struct,
            Self::Var => SymbolKind::Variable,
            Self::Const => SymbolKind::Constant,
        }
    }
}

fn value_kind(keyword: &str) -> SymbolKind {
    if keyword == "const" {
        SymbolKind::Constant
    } else {
        SymbolKind::Variable
    }
}

/// Extract declarations from one file's text, in source order.
pub fn scan_source(
    path: &str,
    source: &str,
) -> Vec<SymbolEntry> {
    let mut out = Vec::new();
    let mut group: Option<Group> = None;
    let mut depth = 0i32;
    let mut carry = Carry::Code;

    for (idx, line) in source.lines().enumerate() {
        let line_no = idx as u32 + 1;
        let starts_in = carry;
        let (delta, ends_in) = scan_line(line, carry);
        carry = ends_in;

        // Inside a block comment or raw string: no declaration starts here.
        if starts_in != Carry::Code {
            if group.is_some() {
                depth += delta;
            }
            continue;
        }

        if let Some(current) = group {
            if depth == 0 && line.starts_with(')') {
                group = None;
                continue;
            }
            if depth == 0 {
                let member = match current {
                    Group::Type => GROUP_TYPE_MEMBER.captures(line),
                    Group::Var | Group::Const => GROUP_VALUE_MEMBER.captures(line),
                };
                if let Some(caps) = member
                    && let Some(names) = caps.get(1)
                {
                    push_names(&mut out, path, line, line_no, names.start(), names.as_str(), current.kind());
                }
            }
            depth += delta;
            continue;
        }

        if line.starts_with("//") {
            continue;
        }

        if let Some(caps) = GROUP_OPEN.captures(line) {
            group = caps.get(1).and_then(|keyword| Group::from_keyword(keyword.as_str()));
            depth = 0;
            continue;
        }

        if let Some(caps) = FUNC_DECL.captures(line) {
            if let Some(name) = caps.get(2) {
                let kind = if caps.get(1).is_some() {
                    SymbolKind::Method
                } else {
                    SymbolKind::Function
                };
                out.push(SymbolEntry::new(name.as_str(), kind, path, line_no, utf16_column(line, name.start())));
            }
            continue;
        }

        if let Some(caps) = TYPE_DECL.captures(line) {
            if let Some(name) = caps.get(1) {
                out.push(SymbolEntry::new(
                    name.as_str(),
                    SymbolKind::Struct,
                    path,
                    line_no,
                    utf16_column(line, name.start()),
                ));
            }
            continue;
        }

        if let Some(caps) = VALUE_DECL.captures(line)
            && let (Some(keyword), Some(names)) = (caps.get(1), caps.get(2))
        {
            push_names(&mut out, path, line, line_no, names.start(), names.as_str(), value_kind(keyword.as_str()));
        }
    }

    out
}

fn push_names(
    out: &mut Vec<SymbolEntry>,
    path: &str,
    line: &str,
    line_no: u32,
    list_start: usize,
    list: &str,
    kind: SymbolKind,
) {
    for ident in IDENT.find_iter(list) {
        out.push(SymbolEntry::new(ident.as_str(), kind, path, line_no, utf16_column(line, list_start + ident.start())));
    }
}

/// 1-based UTF-16 column of a byte offset.
fn utf16_column(
    line: &str,
    byte_offset: usize,
) -> u32 {
    line[..byte_offset].encode_utf16().count() as u32 + 1
}

/// Lexical state that can span line breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Carry {
    Code,
    BlockComment,
    RawString,
}

/// Net bracket depth change of a line and the state it leaves behind.
/// Brackets inside strings, runes and comments do not count.
fn scan_line(
    line: &str,
    mut carry: Carry,
) -> (i32, Carry) {
    let mut delta = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match carry {
            Carry::BlockComment => {
                if ch == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    carry = Carry::Code;
                }
                continue;
            },
            Carry::RawString => {
                if ch == '`' {
                    carry = Carry::Code;
                }
                continue;
            },
            Carry::Code => {},
        }
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            '`' => carry = Carry::RawString,
            '/' if chars.peek() == Some(&'/') => break,
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                carry = Carry::BlockComment;
            },
            '{' | '(' | '[' => delta += 1,
            '}' | ')' | ']' => delta -= 1,
            _ => {},
        }
    }
    (delta, carry)
}

fn is_excluded_dir(
    entry: &DirEntry,
    options: &ScanOptions,
) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    (options.skip_hidden && name.starts_with('.')) || options.exclude_dirs.iter().any(|dir| dir.as_str() == name)
}

fn has_scanned_extension(
    path: &Path,
    options: &ScanOptions,
) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| options.extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
}

/// Walk `root` and scan every matching file. Blocking.
///
/// Files are visited in file-name order so that repeated scans of an
/// unchanged tree produce the same index order.
pub fn scan_workspace(
    root: &Path,
    options: &ScanOptions,
) -> Vec<SymbolEntry> {
    let mut symbols = Vec::new();
    let mut files = 0usize;

    let walker = WalkDir::new(root).sort_by_file_name().into_iter().filter_entry(|e| !is_excluded_dir(e, options));
    for entry in walker.filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() || !has_scanned_extension(entry.path(), options) {
            continue;
        }
        let Ok(source) = std::fs::read_to_string(entry.path()) else {
            trace!("[scanner] skipping unreadable {}", entry.path().display());
            continue;
        };
        files += 1;
        symbols.extend(scan_source(&entry.path().display().to_string(), &source));
    }

    debug!("[scanner] {} symbols from {files} files under {}", symbols.len(), root.display());
    symbols
}

#[cfg(test)]
#[path = "../../tests/src/symbols/scanner_tests.rs"]
mod tests;
