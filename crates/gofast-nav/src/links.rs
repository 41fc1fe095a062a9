//! Detection of quoted path references (`"./util"`, `'@/api/client'`,
//! `"pkg/strings"`) that the editor renders as followable links.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::navigation::{TextPosition, TextRange};

static PATH_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"["'](@/[^"']+)["']|["'](\.\.?[^"']+)["']|["']([^"']+/[^"']+)["']"#).expect("valid link regex")
});
static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"["']([^"']+)["']"#).expect("valid quoted regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLink {
    /// The reference text without quotes.
    pub reference: String,
    /// 1-based column span of `reference`, end exclusive.
    pub range: TextRange,
}

/// Every path-like quoted string on one line.
pub fn find_path_links(
    line_text: &str,
    line_number: u32,
) -> Vec<PathLink> {
    PATH_LINK
        .captures_iter(line_text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
        .map(|reference| PathLink {
            reference: reference.as_str().to_string(),
            range: TextRange::new(
                TextPosition::new(line_number, utf16_column(line_text, reference.start())),
                TextPosition::new(line_number, utf16_column(line_text, reference.end())),
            ),
        })
        .collect()
}

/// The quoted path under a 1-based `column`, if it looks like a file path.
///
/// The span tested runs from the opening quote to the closing quote.
pub fn link_at(
    line_text: &str,
    line_number: u32,
    column: u32,
) -> Option<PathLink> {
    QUOTED.captures_iter(line_text).find_map(|caps| {
        let whole = caps.get(0)?;
        let inner = caps.get(1)?;
        let start = utf16_column(line_text, whole.start());
        let end = utf16_column(line_text, whole.end()) - 1;
        if column < start || column > end {
            return None;
        }
        let reference = inner.as_str();
        if !(reference.contains('/') || reference.starts_with('.')) {
            return None;
        }
        Some(PathLink {
            reference: reference.to_string(),
            range: TextRange::new(
                TextPosition::new(line_number, utf16_column(line_text, inner.start())),
                TextPosition::new(line_number, utf16_column(line_text, inner.end())),
            ),
        })
    })
}

fn utf16_column(
    line: &str,
    byte_offset: usize,
) -> u32 {
    line[..byte_offset.min(line.len())].encode_utf16().count() as u32 + 1
}

#[cfg(test)]
#[path = "../tests/src/links_tests.rs"]
mod tests;
