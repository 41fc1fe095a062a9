use super::*;
use crate::symbols::SymbolKind;

#[test]
fn selection_spans_symbol_name() {
    let entry = SymbolEntry::new("Run", SymbolKind::Function, "a.go", 4, 6);
    let target = NavigationTarget::from_entry(&entry, "Run");

    assert_eq!(target.selection(), TextRange::new(TextPosition::new(4, 6), TextPosition::new(4, 9)));
}

#[test]
fn selection_end_saturates_at_column_limit() {
    let entry = SymbolEntry::new("Run", SymbolKind::Function, "a.go", 1, u32::MAX);
    let selection = NavigationTarget::from_entry(&entry, "Run").selection();

    assert_eq!(selection.start, TextPosition::new(1, u32::MAX));
    assert_eq!(selection.end, TextPosition::new(1, u32::MAX));
}

#[test]
fn file_start_selects_nothing() {
    let target = NavigationTarget::file_start("pkg/a.go");

    assert_eq!(target.selection(), TextRange::new(TextPosition::new(1, 1), TextPosition::new(1, 1)));
}
