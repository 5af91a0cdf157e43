// LogTint - app/highlight.rs
//
// Command-line pipeline: resolve input paths, read and classify each
// document, then write it in the selected output format.
//
// Error policy:
//   - A path named explicitly on the command line must be readable; failure
//     is fatal.
//   - Files found by walking a directory are best-effort: unreadable or
//     oversized files become warnings and the run continues.

use crate::core::classifier;
use crate::core::discovery::{self, DiscoveryConfig};
use crate::core::export;
use crate::core::model::{ClassificationResult, ClassifiedDocument, TokenKind};
use crate::core::render::{self, OutputFormat};
use crate::core::style::Theme;
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::{DiscoveryError, ExportError, InputError, LogTintError};
use crate::util::logging;
use rayon::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

// =============================================================================
// Inputs
// =============================================================================

/// Where one document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File {
        path: PathBuf,
        /// Found by walking a directory rather than named directly.
        discovered: bool,
    },
}

impl InputSource {
    /// Name shown in headings, summaries and exports.
    pub fn display_name(&self) -> String {
        match self {
            InputSource::Stdin => fs::STDIN_NAME.to_string(),
            InputSource::File { path, .. } => path.display().to_string(),
        }
    }
}

/// Expand command-line paths into a list of inputs.
///
/// No paths (or a single `-`) means stdin; a repeated `-` is read once.
/// Directories are walked with `discovery`. Discovered files larger than
/// `max_file_size` are dropped here. Warnings are returned alongside the
/// inputs.
pub fn collect_inputs(
    paths: &[PathBuf],
    discovery_config: &DiscoveryConfig,
    max_file_size: u64,
) -> Result<(Vec<InputSource>, Vec<String>), DiscoveryError> {
    if paths.is_empty() {
        return Ok((vec![InputSource::Stdin], Vec::new()));
    }

    let mut inputs = Vec::new();
    let mut warnings = Vec::new();

    for path in paths {
        if path.as_os_str() == fs::STDIN_NAME {
            if inputs.contains(&InputSource::Stdin) {
                warnings.push("stdin ('-') given more than once; it is read once".to_string());
            } else {
                inputs.push(InputSource::Stdin);
            }
        } else if path.is_dir() {
            let (files, dir_warnings) = discovery::discover_files(path, discovery_config)?;
            if files.is_empty() {
                warnings.push(format!(
                    "No files matching {:?} under '{}'",
                    discovery_config.include_patterns,
                    path.display()
                ));
            }
            warnings.extend(dir_warnings);
            for file in files {
                if file.size > max_file_size {
                    let skipped = InputError::TooLarge {
                        path: file.path,
                        size: file.size,
                        max_size: max_file_size,
                    };
                    tracing::warn!(error = %skipped, "Skipping file");
                    warnings.push(skipped.to_string());
                    continue;
                }
                inputs.push(InputSource::File {
                    path: file.path,
                    discovered: true,
                });
            }
        } else if path.exists() {
            inputs.push(InputSource::File {
                path: path.clone(),
                discovered: false,
            });
        } else {
            return Err(DiscoveryError::RootNotFound { path: path.clone() });
        }
    }

    tracing::debug!(inputs = inputs.len(), "Inputs collected");
    Ok((inputs, warnings))
}

// =============================================================================
// Options
// =============================================================================

/// Everything the pipeline needs besides the inputs.
#[derive(Debug, Clone)]
pub struct HighlightOptions {
    pub format: OutputFormat,
    /// Resolved colour decision for ANSI output.
    pub colour_enabled: bool,
    /// Force parallel classification regardless of size.
    pub parallel: bool,
    /// Texts at least this many bytes long are classified in parallel.
    pub parallel_threshold: usize,
    pub max_file_size: u64,
    pub theme: Theme,
    pub html_title: String,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            colour_enabled: false,
            parallel: false,
            parallel_threshold: constants::DEFAULT_PARALLEL_THRESHOLD,
            max_file_size: constants::DEFAULT_MAX_FILE_SIZE,
            theme: Theme::default(),
            html_title: constants::DEFAULT_HTML_TITLE.to_string(),
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Documents classified and written.
    pub documents: Vec<ClassifiedDocument>,
    /// Total spans across all documents.
    pub span_count: usize,
    /// Non-fatal problems (skipped files).
    pub warnings: Vec<String>,
}

// =============================================================================
// Pipeline
// =============================================================================

/// Classify `text`, choosing the parallel path for large input.
pub fn classify_document(text: &str, opts: &HighlightOptions) -> ClassificationResult {
    if opts.parallel || text.len() >= opts.parallel_threshold {
        classifier::classify_parallel(text)
    } else {
        classifier::classify(text)
    }
}

/// Read every input and classify it.
///
/// Reading is sequential (stdin can only be read once, and files are
/// usually I/O bound); classification of the loaded texts runs across the
/// rayon pool.
pub fn load_documents(
    inputs: &[InputSource],
    opts: &HighlightOptions,
) -> Result<(Vec<ClassifiedDocument>, Vec<String>), InputError> {
    let mut loaded: Vec<(String, String)> = Vec::with_capacity(inputs.len());
    let mut warnings = Vec::new();

    for input in inputs {
        let text = match input {
            InputSource::Stdin => fs::read_stdin()?,
            InputSource::File { path, discovered } => {
                match fs::read_document(path, opts.max_file_size) {
                    Ok(text) => text,
                    Err(e) if *discovered => {
                        tracing::warn!(error = %e, "Skipping file");
                        warnings.push(e.to_string());
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }
        };
        let source = input.display_name();
        tracing::debug!(
            source = %source,
            bytes = text.len(),
            first_line = logging::preview(text.lines().next().unwrap_or("")),
            "Document read"
        );
        loaded.push((source, text));
    }

    let documents = loaded
        .into_par_iter()
        .map(|(source, text)| {
            let result = classify_document(&text, opts);
            ClassifiedDocument {
                source,
                text,
                result,
            }
        })
        .collect();

    Ok((documents, warnings))
}

/// Write `documents` to `writer` in `opts.format`.
///
/// `dest` names the destination in error messages. Returns the number of
/// spans written.
pub fn write_output<W: Write>(
    documents: &[ClassifiedDocument],
    opts: &HighlightOptions,
    writer: &mut W,
    dest: &Path,
) -> Result<usize, ExportError> {
    let io_err = |source: std::io::Error| ExportError::Io {
        path: dest.to_path_buf(),
        source,
    };
    let span_count = documents.iter().map(|d| d.result.len()).sum();

    match opts.format {
        OutputFormat::Ansi | OutputFormat::Plain => {
            let multiple = documents.len() > 1;
            for (i, doc) in documents.iter().enumerate() {
                if multiple {
                    if i > 0 {
                        writeln!(writer).map_err(io_err)?;
                    }
                    writeln!(writer, "==> {} <==", doc.source).map_err(io_err)?;
                }
                if opts.format == OutputFormat::Ansi && opts.colour_enabled {
                    render::render_ansi(&doc.text, &doc.result, &opts.theme, writer)
                        .map_err(io_err)?;
                } else {
                    render::render_plain(&doc.text, writer).map_err(io_err)?;
                }
            }
        }
        OutputFormat::Html => {
            render::render_html(documents, &opts.theme, &opts.html_title, writer)
                .map_err(io_err)?;
        }
        OutputFormat::Json => {
            export::export_json(documents, &mut *writer, dest)?;
        }
        OutputFormat::Csv => {
            export::export_csv(documents, &mut *writer, dest)?;
        }
    }

    writer.flush().map_err(io_err)?;
    Ok(span_count)
}

/// Full pipeline: load, classify, write.
pub fn run<W: Write>(
    inputs: &[InputSource],
    opts: &HighlightOptions,
    writer: &mut W,
    dest: &Path,
) -> Result<RunReport, LogTintError> {
    let started = Instant::now();

    let (documents, warnings) = load_documents(inputs, opts)?;
    let span_count = write_output(&documents, opts, writer, dest)?;

    tracing::info!(
        documents = documents.len(),
        spans = span_count,
        skipped = warnings.len(),
        format = %opts.format,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Highlight run complete"
    );

    Ok(RunReport {
        documents,
        span_count,
        warnings,
    })
}

/// Human-readable per-document statistics.
pub fn write_summary<W: Write>(documents: &[ClassifiedDocument], writer: &mut W) -> std::io::Result<()> {
    for doc in documents {
        let summary = doc.result.summary(&doc.text);
        writeln!(writer, "{}: {} spans", doc.source, doc.result.len())?;
        for kind in TokenKind::all() {
            let count = summary.count(*kind);
            if count > 0 {
                writeln!(writer, "  {:<18} {count}", kind.label())?;
            }
        }
        writeln!(writer, "  {:<18} {}", "Timestamps", summary.timestamps)?;
        if let (Some(first), Some(last)) = (summary.first_timestamp, summary.last_timestamp) {
            writeln!(writer, "  {:<18} {first} .. {last}", "Time range")?;
        }
    }
    Ok(())
}
