// LogTint - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading (config.toml, CLI overrides)
// 3. Logging initialisation (debug mode support)
// 4. Either the highlight pipeline (default) or the eframe viewer (--gui)

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use logtint::app;

pub use logtint::core;
pub use logtint::platform;
pub use logtint::ui;
pub use logtint::util;

use clap::Parser;
use is_terminal::IsTerminal;
use std::io::Write;
use std::path::{Path, PathBuf};

/// LogTint - Syntax highlighter for CAN-style bus logs.
///
/// Colours bracketed timestamps, `Frame ID:` and `Data:` headers, and their
/// hexadecimal payloads. Reads files, directories or stdin and writes ANSI,
/// HTML, JSON, CSV or plain text; `--gui` opens an interactive viewer.
#[derive(Parser, Debug)]
#[command(name = "logtint", version, about)]
struct Cli {
    /// Files or directories to highlight ("-" or nothing reads stdin).
    paths: Vec<PathBuf>,

    /// Output format: ansi, html, json, csv or plain.
    #[arg(short = 'f', long = "format")]
    format: Option<crate::core::render::OutputFormat>,

    /// Write output to FILE instead of stdout.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// When to emit ANSI colour: auto, always or never.
    #[arg(long = "colour", alias = "color", value_name = "WHEN")]
    colour: Option<crate::core::render::ColourMode>,

    /// Always classify with the parallel scanner.
    #[arg(long = "parallel")]
    parallel: bool,

    /// Print per-file span counts to stderr after the output.
    #[arg(short = 's', long = "summary")]
    summary: bool,

    /// Open the interactive viewer (with the first file, if given).
    #[arg(long = "gui")]
    gui: bool,

    /// Configuration file (defaults to the platform config directory).
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Load configuration before logging so [logging] level can apply.
    // An explicitly named config file must be readable.
    let (config, config_warnings) = match cli.config {
        Some(ref path) => match platform::config::read_config(path) {
            Ok(content) => platform::config::parse_config(&content, path),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => {
            let paths = platform::config::PlatformPaths::resolve();
            platform::config::load_config(&paths.config_file())
        }
    };

    // Initialise logging subsystem
    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "LogTint starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    let result = if cli.gui {
        run_gui(&cli, &config)
    } else {
        run_cli(&cli, &config)
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Fatal error");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Highlight the inputs and write them to stdout or `--output`.
fn run_cli(cli: &Cli, config: &platform::config::AppConfig) -> util::error::Result<()> {
    let (inputs, warnings) =
        app::highlight::collect_inputs(&cli.paths, &config.discovery, config.max_file_size)?;
    for warning in &warnings {
        tracing::warn!(warning = %warning, "Discovery warning");
    }

    let format = cli.format.unwrap_or(config.format);
    let colour = cli.colour.unwrap_or(config.colour);

    let mut opts = app::highlight::HighlightOptions {
        format,
        colour_enabled: false,
        parallel: cli.parallel,
        parallel_threshold: config.parallel_threshold,
        max_file_size: config.max_file_size,
        theme: config.theme.clone(),
        html_title: html_title(&cli.paths),
    };

    let report = match cli.output {
        Some(ref dest) => {
            opts.colour_enabled = colour.enabled(false);
            let file = std::fs::File::create(dest).map_err(|source| {
                util::error::ExportError::Io {
                    path: dest.clone(),
                    source,
                }
            })?;
            let mut writer = std::io::BufWriter::new(file);
            app::highlight::run(&inputs, &opts, &mut writer, dest)?
        }
        None => {
            let stdout = std::io::stdout();
            opts.colour_enabled = colour.enabled(stdout.is_terminal());
            let mut writer = std::io::BufWriter::new(stdout.lock());
            app::highlight::run(&inputs, &opts, &mut writer, Path::new("<stdout>"))?
        }
    };

    for warning in &report.warnings {
        eprintln!("Warning: {warning}");
    }
    if cli.summary {
        let mut stderr = std::io::stderr().lock();
        // Summary is informational; a closed stderr is not worth failing for.
        let _ = app::highlight::write_summary(&report.documents, &mut stderr);
        let _ = stderr.flush();
    }
    Ok(())
}

/// HTML page title: the single input's file name, or the app name.
fn html_title(paths: &[PathBuf]) -> String {
    match paths {
        [single] if single.is_file() => single
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| util::constants::DEFAULT_HTML_TITLE.to_string()),
        _ => util::constants::DEFAULT_HTML_TITLE.to_string(),
    }
}

/// Launch the eframe viewer.
fn run_gui(cli: &Cli, config: &platform::config::AppConfig) -> util::error::Result<()> {
    let mut state = app::state::ViewerState::new(config, cli.debug);

    // The viewer shows one file; extra paths are ignored with a warning.
    if let Some(first) = cli.paths.first() {
        if cli.paths.len() > 1 {
            tracing::warn!(ignored = cli.paths.len() - 1, "Viewer opens only the first path");
        }
        state.pending_open = Some(first.clone());
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size(util::constants::VIEWER_WINDOW_SIZE)
            .with_min_inner_size(util::constants::VIEWER_MIN_WINDOW_SIZE),
        ..Default::default()
    };

    tracing::info!("Launching viewer");
    eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |_cc| Ok(Box::new(gui::LogTintApp::new(state)))),
    )
    .map_err(|e| util::error::LogTintError::Gui {
        reason: e.to_string(),
    })
}
