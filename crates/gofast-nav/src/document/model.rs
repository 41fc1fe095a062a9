use crate::navigation::{TextPosition, TextRange};

// ── DocumentModel ───────────────────────────────────────────────────────────

/// Addressable text buffer for one file.
///
/// Positions are 1-based; columns count UTF-16 code units, matching the
/// editor widget.
#[derive(Debug, Clone)]
pub struct DocumentModel {
    /// Path exactly as the backend was asked for it.
    pub path: String,
    /// Full source text at load time.
    pub content: String,
    /// Line start byte offsets.
    line_offsets: Vec<usize>,
}

impl DocumentModel {
    pub fn new(
        path: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        let line_offsets = compute_line_offsets(&content);
        Self {
            path: path.into(),
            content,
            line_offsets,
        }
    }

    // ── queries ─────────────────────────────────────────────────────────

    pub fn line_count(&self) -> usize {
        self.line_offsets.len()
    }

    /// Text of a 1-based line without its line terminator.
    pub fn line_text(
        &self,
        line: u32,
    ) -> Option<&str> {
        let idx = (line as usize).checked_sub(1)?;
        let start = *self.line_offsets.get(idx)?;
        let end = self.line_offsets.get(idx + 1).copied().unwrap_or(self.content.len());
        let slice = &self.content[start..end];
        Some(slice.trim_end_matches('\n').trim_end_matches('\r'))
    }

    /// Byte offset of a 1-based position, clamped to the end of its line.
    pub fn offset_of(
        &self,
        pos: TextPosition,
    ) -> Option<usize> {
        let line_text = self.line_text(pos.line)?;
        let line_start = self.line_offsets[pos.line as usize - 1];
        let target = pos.column.saturating_sub(1);

        let mut utf16_offset: u32 = 0;
        let mut byte_offset = line_start;
        for ch in line_text.chars() {
            if utf16_offset >= target {
                break;
            }
            utf16_offset += ch.len_utf16() as u32;
            byte_offset += ch.len_utf8();
        }
        Some(byte_offset)
    }
}

// ── word lookup ─────────────────────────────────────────────────────────────

/// The identifier under (or immediately left of) `pos` in `line_text`, the
/// text of line `pos.line`, with its range.
pub fn word_at(
    line_text: &str,
    pos: TextPosition,
) -> Option<(String, TextRange)> {
    let chars: Vec<char> = line_text.chars().collect();
    if chars.is_empty() {
        return None;
    }
    let target = pos.column.saturating_sub(1);

    let mut char_idx: usize = chars.len();
    let mut utf16_count: u32 = 0;
    for (i, &ch) in chars.iter().enumerate() {
        if utf16_count >= target {
            char_idx = i;
            break;
        }
        utf16_count += ch.len_utf16() as u32;
    }

    if char_idx >= chars.len() {
        char_idx = chars.len() - 1;
    }
    if !is_word_char(chars[char_idx]) {
        if char_idx > 0 && is_word_char(chars[char_idx - 1]) {
            char_idx -= 1;
        } else {
            return None;
        }
    }

    let mut start = char_idx;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }
    let mut end = char_idx;
    while end + 1 < chars.len() && is_word_char(chars[end + 1]) {
        end += 1;
    }

    let word: String = chars[start..=end].iter().collect();
    let start_utf16: u32 = chars[..start].iter().map(|c| c.len_utf16() as u32).sum();
    let end_utf16: u32 = chars[..=end].iter().map(|c| c.len_utf16() as u32).sum();
    let range = TextRange::new(
        TextPosition::new(pos.line, start_utf16 + 1),
        TextPosition::new(pos.line, end_utf16 + 1),
    );

    Some((word, range))
}

// ── helpers ─────────────────────────────────────────────────────────────────

fn compute_line_offsets(text: &str) -> Vec<usize> {
    let mut offsets = vec![0usize];
    for (i, byte) in text.bytes().enumerate() {
        if byte == b'\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
#[path = "../../tests/src/document/model_tests.rs"]
mod tests;
