use super::*;
use crate::symbols::SymbolKind;

fn temp_file(
    tag: &str,
    text: &str,
) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "gofast-nav-symbols-{tag}-{}.json",
        std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).expect("clock drift").as_nanos()
    ));
    std::fs::write(&path, text).expect("write fixture");
    path
}

#[tokio::test]
async fn lists_payload_and_clamps_positions() {
    let path = temp_file(
        "ok",
        r#"[
            {"name": "Serve", "kind": "Function", "path": "srv/a.go", "line": 12, "character": 6},
            {"name": "Config", "path": "srv/b.go", "line": 0, "character": 0},
            {"name": "Mode", "kind": "Enum", "path": "srv/c.go", "line": 3, "character": 7}
        ]"#,
    );
    let source = SymbolListFile::new(&path);

    let entries = source.list_symbols().await.expect("payload decodes");
    assert_eq!(entries, vec![
        SymbolEntry::new("Serve", SymbolKind::Function, "srv/a.go", 12, 6),
        SymbolEntry::new("Config", SymbolKind::Other, "srv/b.go", 1, 1),
        SymbolEntry::new("Mode", SymbolKind::Other, "srv/c.go", 3, 7),
    ]);

    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn malformed_payload_is_decode_error() {
    let path = temp_file("bad", r#"{"symbols": []}"#);
    let source = SymbolListFile::new(&path);

    let err = source.list_symbols().await.expect_err("object is not a list");
    assert!(matches!(err, BackendError::Decode(_)));

    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn missing_file_is_io_error() {
    let source = SymbolListFile::new(std::env::temp_dir().join("gofast-nav-no-such-symbols.json"));

    let err = source.list_symbols().await.expect_err("file is missing");
    assert!(matches!(err, BackendError::Io { ref path, .. } if path == source.path()));
}
