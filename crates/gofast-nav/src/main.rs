use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{Parser, Subcommand};
use gofast_nav::{
    DocumentCache, EditorHost, LocalWorkspace, NavigationController, NavigationOutcome, NavigationRequest,
    NavigatorSettings, Navigator, PathResolver, ReferenceResolver, SymbolIndex, SymbolListFile, SymbolSource,
    TextPosition, TextRange,
    config::CONFIG_FILE_NAME, symbols::ScanOptions,
};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "gofast-nav", version, about)]
struct Args {
    /// Workspace root to index.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Settings file; defaults to `<root>/gofast-nav.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, short, global = true)]
    verbose: bool,

    #[arg(long, global = true)]
    log_file: Option<String>,

    /// Read symbols from a saved list-symbols JSON payload instead of
    /// scanning the workspace.
    #[arg(long, global = true)]
    symbols_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Index the workspace once and print the symbols as JSON.
    Symbols {
        #[arg(long)]
        name: Option<String>,
    },
    /// Resolve a symbol and jump to it.
    Goto {
        #[arg(long)]
        from: String,
        #[arg(long, conflicts_with_all = ["line", "column"])]
        symbol: Option<String>,
        #[arg(long, requires = "column")]
        line: Option<u32>,
        #[arg(long, requires = "line")]
        column: Option<u32>,
    },
    /// Resolve a quoted path reference relative to a file.
    OpenLink {
        #[arg(long)]
        from: String,
        #[arg(long)]
        reference: String,
    },
    /// Keep the index fresh until interrupted.
    Watch,
}

/// Stand-in for the editor widget: logs every side effect and completes
/// document switches as soon as they are requested.
#[derive(Default)]
struct ConsoleHost {
    requested_switch: Option<String>,
}

impl EditorHost for ConsoleHost {
    fn open_document(
        &mut self,
        path: &str,
    ) {
        info!("open document {path}");
        self.requested_switch = Some(path.to_string());
    }

    fn reveal_range(
        &mut self,
        range: TextRange,
    ) {
        info!("reveal {}:{}-{}:{}", range.start.line, range.start.column, range.end.line, range.end.column);
    }

    fn set_selection(
        &mut self,
        range: TextRange,
    ) {
        info!("select {}:{}-{}", range.start.line, range.start.column, range.end.column);
    }

    fn focus(&mut self) {
        info!("focus editor");
    }
}

fn default_log_path() -> PathBuf {
    let dir = dirs_or_tmp();
    dir.join("gofast-nav.log")
}

fn dirs_or_tmp() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        let dir = PathBuf::from(home).join(".gofast-nav");
        if std::fs::create_dir_all(&dir).is_ok() {
            return dir;
        }
    }
    std::env::temp_dir()
}

fn init_tracing(
    args: &Args,
    settings: &NavigatorSettings,
) -> PathBuf {
    let level = if args.verbose {
        "debug"
    } else {
        settings.logging.level.as_filter_directive()
    };
    let stderr_filter = EnvFilter::new(format!("gofast_nav={level}"));
    let file_filter = EnvFilter::new(format!("gofast_nav={level}"));

    let log_path = args.log_file.as_ref().map(PathBuf::from).unwrap_or_else(default_log_path);

    let file_appender = tracing_appender::rolling::never(
        log_path.parent().unwrap_or(Path::new(".")),
        log_path.file_name().unwrap_or(std::ffi::OsStr::new("gofast-nav.log")),
    );

    let file_layer = fmt::layer().with_writer(file_appender).with_ansi(false).with_target(false).with_filter(file_filter);

    let stderr_layer =
        fmt::layer().with_writer(std::io::stderr).with_ansi(false).with_target(false).with_filter(stderr_filter);

    tracing_subscriber::registry().with(file_layer).with(stderr_layer).init();
    log_path
}

fn load_settings(
    root: &Path,
    explicit: Option<&Path>,
) -> NavigatorSettings {
    let candidate = explicit.map(Path::to_path_buf).unwrap_or_else(|| root.join(CONFIG_FILE_NAME));
    if explicit.is_none() && !candidate.is_file() {
        return NavigatorSettings::default();
    }
    match NavigatorSettings::load(&candidate) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("gofast-nav: {error}; using defaults");
            NavigatorSettings::default()
        },
    }
}

/// Spell `from` the way the scanner reports paths under `root`, so that
/// same-file matching sees identical strings.
fn workspace_path(
    root: &Path,
    from: &str,
) -> String {
    let path = Path::new(from);
    if path.is_absolute() || path.starts_with(root) {
        from.to_string()
    } else {
        root.join(path).display().to_string()
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(error) => error!("failed to encode output: {error}"),
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let root = args.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let settings = load_settings(&root, args.config.as_deref());
    let log_path = init_tracing(&args, &settings);

    info!("Starting gofast-nav v{}", env!("CARGO_PKG_VERSION"));
    info!("Log file: {}", log_path.display());

    let workspace = Arc::new(LocalWorkspace::new(root, ScanOptions::from(&settings.indexing)));
    let index = Arc::new(SymbolIndex::new());
    let documents = Arc::new(DocumentCache::new(workspace.clone()));
    let symbols: Arc<dyn SymbolSource> = match args.symbols_file {
        Some(path) => {
            info!("Symbols from {}", path.display());
            Arc::new(SymbolListFile::new(path))
        },
        None => workspace.clone(),
    };

    match args.command {
        Command::Symbols {
            name,
        } => {
            index.refresh(symbols.as_ref()).await;
            match name {
                Some(name) => print_json(&index.lookup(&name)),
                None => print_json(&index.snapshot().to_vec()),
            }
        },
        Command::Goto {
            from,
            symbol,
            line,
            column,
        } => {
            let from = workspace_path(workspace.root(), &from);
            index.refresh(symbols.as_ref()).await;
            let resolver = ReferenceResolver::new(Arc::clone(&index), Arc::clone(&documents));
            let controller = NavigationController::new(ConsoleHost::default(), Some(from.clone()));
            let mut navigator = Navigator::new(resolver, workspace.clone(), controller);

            let outcome = match (symbol, line, column) {
                (Some(name), _, _) => {
                    navigator
                        .navigate(NavigationRequest::Symbol {
                            name,
                            origin_path: from.clone(),
                            position: TextPosition::default(),
                        })
                        .await
                },
                (None, Some(line), Some(column)) => {
                    navigator.goto_definition_at(&from, TextPosition::new(line, column)).await
                },
                _ => {
                    error!("goto needs either --symbol or --line/--column");
                    std::process::exit(2);
                },
            };

            match outcome {
                NavigationOutcome::Applied(target) => print_json(&target),
                NavigationOutcome::Deferred(target) => {
                    if let Some(path) = navigator.controller_mut().host_mut().requested_switch.take() {
                        navigator.active_document_changed(&path);
                    }
                    print_json(&target);
                },
                NavigationOutcome::Intercepted | NavigationOutcome::Unresolved => {
                    warn!("no definition found");
                    std::process::exit(1);
                },
            }
            navigator.resolver().log_perf_summary();
        },
        Command::OpenLink {
            from,
            reference,
        } => match workspace.resolve_path(&workspace_path(workspace.root(), &from), &reference).await {
            Ok(path) => println!("{path}"),
            Err(error) => {
                error!("{error}");
                std::process::exit(1);
            },
        },
        Command::Watch => {
            let refresher = index.spawn_refresh_loop(symbols, settings.indexing.refresh_interval());
            info!("refreshing every {}s; press Ctrl-C to stop", settings.indexing.refresh_interval_secs);
            if let Err(error) = tokio::signal::ctrl_c().await {
                error!("failed to listen for Ctrl-C: {error}");
            }
            refresher.abort();
        },
    }

    info!("gofast-nav stopped");
}
