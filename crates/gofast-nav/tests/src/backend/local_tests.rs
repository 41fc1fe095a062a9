use super::*;

fn temp_root(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "gofast-nav-local-{tag}-{}",
        std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).expect("clock drift").as_nanos()
    ))
}

fn write(
    root: &Path,
    relative: &str,
    text: &str,
) -> PathBuf {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().expect("fixture has parent")).expect("create fixture dir");
    std::fs::write(&path, text).expect("write fixture");
    path
}

#[test]
fn resolves_relative_reference_by_trying_suffixes() {
    let root = temp_root("relative");
    let base = write(&root, "web/src/pages/home.tsx", "import x from './widgets/card'");
    let card = write(&root, "web/src/pages/widgets/card.tsx", "export {}");
    let workspace = LocalWorkspace::new(&root, ScanOptions::default());

    let resolved = workspace.resolve_path_blocking(&base.display().to_string(), "./widgets/card").expect("resolves");
    assert_eq!(PathBuf::from(resolved), card);

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn resolves_parent_reference_and_index_file() {
    let root = temp_root("parent");
    let base = write(&root, "app/views/list.ts", "");
    let index = write(&root, "app/store/index.ts", "");
    let workspace = LocalWorkspace::new(&root, ScanOptions::default());

    let resolved = workspace.resolve_path_blocking(&base.display().to_string(), "../store").expect("resolves");
    assert_eq!(PathBuf::from(resolved), index);

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn root_alias_tries_root_then_src() {
    let root = temp_root("alias");
    let base = write(&root, "src/pages/home.tsx", "");
    let client = write(&root, "src/api/client.ts", "");
    let workspace = LocalWorkspace::new(&root, ScanOptions::default());

    let resolved = workspace.resolve_path_blocking(&base.display().to_string(), "@/api/client").expect("resolves");
    assert_eq!(PathBuf::from(resolved), client);

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn bare_reference_falls_back_to_workspace_root() {
    let root = temp_root("bare");
    let base = write(&root, "cmd/server/main.go", "");
    let handler = write(&root, "internal/http/handler.go", "");
    let workspace = LocalWorkspace::new(&root, ScanOptions::default());

    let resolved =
        workspace.resolve_path_blocking(&base.display().to_string(), "internal/http/handler").expect("resolves");
    assert_eq!(PathBuf::from(resolved), handler);

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn unresolvable_reference_is_not_found() {
    let root = temp_root("missing");
    let base = write(&root, "main.go", "");
    let workspace = LocalWorkspace::new(&root, ScanOptions::default());

    let err = workspace.resolve_path_blocking(&base.display().to_string(), "./nowhere").expect_err("missing");
    assert!(matches!(err, BackendError::NotFound { .. }));

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn clean_path_folds_dots() {
    assert_eq!(clean_path(Path::new("a/./b/../c")), PathBuf::from("a/c"));
    assert_eq!(clean_path(Path::new("../../x")), PathBuf::from("../../x"));
}

#[tokio::test]
async fn list_symbols_skips_hidden_and_excluded_dirs() {
    let root = temp_root("scan");
    write(&root, "a/util.go", "package a\n\nfunc Helper() {}\n");
    write(&root, "b/main.go", "package main\n\nfunc main() {}\n");
    write(&root, ".git/hooks.go", "package hooks\n\nfunc Hidden() {}\n");
    write(&root, "vendor/dep/dep.go", "package dep\n\nfunc Vendored() {}\n");
    write(&root, "web/app.ts", "function Helper() {}\n");
    let workspace = LocalWorkspace::new(&root, ScanOptions::default());

    let symbols = workspace.list_symbols().await.expect("scan succeeds");
    let names: Vec<&str> = symbols.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Helper", "main"]);
    assert!(symbols[0].path.ends_with("util.go"));

    let _ = std::fs::remove_dir_all(root);
}

#[tokio::test]
async fn list_symbols_fails_for_missing_root() {
    let workspace = LocalWorkspace::new(temp_root("absent"), ScanOptions::default());
    let err = workspace.list_symbols().await.expect_err("no root");
    assert!(matches!(err, BackendError::Io { .. }));
}

#[tokio::test]
async fn read_file_reports_io_error() {
    let root = temp_root("read");
    let path = write(&root, "doc.go", "package doc\n");
    let workspace = LocalWorkspace::new(&root, ScanOptions::default());

    let text = workspace.read_file(&path.display().to_string()).await.expect("readable");
    assert_eq!(text, "package doc\n");

    let missing = root.join("gone.go").display().to_string();
    assert!(matches!(workspace.read_file(&missing).await, Err(BackendError::Io { .. })));

    let _ = std::fs::remove_dir_all(root);
}
