//! CLI entrypoint for OpenAnswer
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use openanswer_application::{
    AnswerGateway, NoThemeSurface, PreferenceStore, SubmitQuestionUseCase, ThemeManager,
};
use openanswer_domain::Theme;
use openanswer_infrastructure::{
    ConfigLoader, FileConfig, FilePreferenceStore, HttpAnswerGateway, InMemoryPreferenceStore,
};
use openanswer_presentation::{
    Cli, ConsoleFormatter, OutputConfig, ProgressReporter, RenderConfig, TerminalThemeSurface,
    TuiApp,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    let interactive = cli.question.is_none() && !cli.toggle_theme;
    let _log_guard = init_logging(cli.verbose, interactive);

    info!("Starting OpenAnswer");

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    if let Some(endpoint) = &cli.endpoint {
        config.api.endpoint = Some(endpoint.clone());
    }
    config.validate().context("Invalid configuration")?;

    // === Dependency Injection ===
    let store = open_store(&config, interactive);

    if cli.toggle_theme {
        let manager = ThemeManager::new(store, Arc::new(NoThemeSurface));
        let theme = manager.toggle()?;
        println!("Theme set to {}", theme);
        return Ok(ExitCode::SUCCESS);
    }

    let client_config = config.client_config();
    info!("Answer endpoint: {}", client_config.endpoint);
    let gateway: Arc<dyn AnswerGateway> = Arc::new(HttpAnswerGateway::new(&client_config)?);

    let render = RenderConfig {
        footnotes: config.render.footnotes && !cli.no_footnotes,
        highlight: config.render.highlight && !cli.no_highlight,
    };

    match cli.question.clone() {
        Some(question) => run_once(&cli, &config, question, gateway, store, render).await,
        None => {
            run_interactive(gateway, store, render).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Ask one question, print the outcome and exit
async fn run_once(
    cli: &Cli,
    config: &FileConfig,
    question: String,
    gateway: Arc<dyn AnswerGateway>,
    store: Arc<dyn PreferenceStore>,
    render: RenderConfig,
) -> Result<ExitCode> {
    let output = OutputConfig {
        format: cli
            .output
            .map(Into::into)
            .or(config.output.format)
            .unwrap_or_default(),
        color: config.output.color,
        show_progress: config.output.show_progress && !cli.quiet,
    };

    // Highlight colours follow the saved theme
    let theme = ThemeManager::new(store, Arc::new(NoThemeSurface)).current();
    let formatter = ConsoleFormatter::from_config(&output, render.options(theme));

    let (ui_tx, ui_rx) = mpsc::unbounded_channel();
    let use_case = SubmitQuestionUseCase::new(gateway).with_ui_events(ui_tx);

    let reporter = if output.show_progress {
        ProgressReporter::new()
    } else {
        ProgressReporter::hidden()
    };
    let progress = tokio::spawn(async move { reporter.run(ui_rx).await });

    let result = use_case.submit(&question).await;
    // Dropping the last sender ends the progress task
    drop(use_case);
    let _ = progress.await;

    let outcome = result?;
    print!("{}", formatter.format_as(output.format, &outcome));

    if outcome.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Open the interactive page
async fn run_interactive(
    gateway: Arc<dyn AnswerGateway>,
    store: Arc<dyn PreferenceStore>,
    render: RenderConfig,
) -> Result<()> {
    let (ui_tx, ui_rx) = mpsc::unbounded_channel();

    let surface = Arc::new(TerminalThemeSurface::new(Theme::default()));
    let theme = Arc::new(ThemeManager::new(store, surface.clone()).with_ui_events(ui_tx.clone()));
    let submit = SubmitQuestionUseCase::new(gateway).with_ui_events(ui_tx);

    let mut app = TuiApp::new(submit, theme, surface, ui_rx).with_render_config(render);
    app.run().await?;
    Ok(())
}

/// Preference file shared by every client; in-memory when it cannot be used.
fn open_store(config: &FileConfig, watch: bool) -> Arc<dyn PreferenceStore> {
    match config.storage.resolved_path() {
        Some(path) => match FilePreferenceStore::open(&path) {
            Ok(store) => {
                if watch {
                    store.start_watching(config.storage.poll_interval());
                }
                return Arc::new(store);
            }
            Err(e) => warn!("Cannot use preference file {}: {}", path.display(), e),
        },
        None => warn!("No data directory; the theme will not be saved"),
    }
    Arc::new(InMemoryPreferenceStore::new())
}

fn log_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("openanswer").join("logs"))
}

/// Initialize logging based on verbosity level.
///
/// The interactive page owns the terminal, so its logs go to a daily file.
fn init_logging(verbose: u8, interactive: bool) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    if !interactive {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return None;
    }

    match log_dir().filter(|dir| std::fs::create_dir_all(dir).is_ok()) {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "openanswer.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .init();
            None
        }
    }
}
