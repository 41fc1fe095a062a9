use serde_json::json;

use super::*;

#[test]
fn defaults_match_documented_values() {
    let settings = NavigatorSettings::default();
    assert_eq!(settings.indexing.refresh_interval_secs, 10);
    assert_eq!(settings.indexing.exclude_dirs, vec!["node_modules".to_string(), "vendor".to_string()]);
    assert!(settings.indexing.skip_hidden);
    assert_eq!(settings.indexing.extensions, vec!["go".to_string()]);
    assert_eq!(settings.logging.level, LogLevel::Info);
}

#[test]
fn toml_file_overrides_and_normalizes() {
    let text = r#"
[indexing]
refresh_interval_secs = 0
exclude_dirs = [" vendor ", "vendor", "", "testdata"]
extensions = [".go", "GO ", "go"]

[logging]
level = "debug"

[unrelated]
value = 1
"#;
    let settings = NavigatorSettings::from_toml_str(text).expect("valid toml");
    assert_eq!(settings.indexing.refresh_interval_secs, MIN_REFRESH_INTERVAL_SECS);
    assert_eq!(settings.indexing.exclude_dirs, vec!["vendor".to_string(), "testdata".to_string()]);
    assert_eq!(settings.indexing.extensions, vec!["go".to_string(), "GO".to_string()]);
    assert_eq!(settings.logging.level, LogLevel::Debug);
}

#[test]
fn invalid_toml_is_reported() {
    let err = NavigatorSettings::from_toml_str("[indexing\nrefresh_interval_secs = 3").expect_err("broken toml");
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn missing_file_is_reported() {
    let path = std::env::temp_dir().join("gofast-nav-missing-config-does-not-exist.toml");
    let err = NavigatorSettings::load(&path).expect_err("missing file");
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn json_payload_merges_bare_and_scoped() {
    let base = NavigatorSettings::default();
    let merged = base.merged_with_payload(&json!({
        "gofast-nav": {
            "indexing": { "refreshIntervalSecs": 99999, "skipHidden": false },
            "logging": { "level": "warn" }
        }
    }));
    assert_eq!(merged.indexing.refresh_interval_secs, MAX_REFRESH_INTERVAL_SECS);
    assert!(!merged.indexing.skip_hidden);
    assert_eq!(merged.logging.level, LogLevel::Warn);

    let bare = base.merged_with_payload(&json!({ "indexing": { "excludeDirs": ["dist"] } }));
    assert_eq!(bare.indexing.exclude_dirs, vec!["dist".to_string()]);
    assert_eq!(bare.indexing.refresh_interval_secs, 10);
}

#[test]
fn malformed_json_payload_is_ignored() {
    let base = NavigatorSettings::default();
    let merged = base.merged_with_payload(&json!({ "indexing": { "refreshIntervalSecs": "soon" } }));
    assert_eq!(merged, base);
}
