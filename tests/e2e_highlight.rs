// LogTint - tests/e2e_highlight.rs
//
// End-to-end tests for the highlight pipeline.
//
// These tests exercise the real filesystem, real walkdir traversal, real
// config.toml parsing and the real renderers: from a bus log on disk to
// ANSI, HTML, JSON and CSV output.

use logtint::app::highlight::{self, HighlightOptions, InputSource};
use logtint::core::classifier::{classify, classify_parallel};
use logtint::core::discovery::DiscoveryConfig;
use logtint::core::model::TokenKind;
use logtint::core::render::OutputFormat;
use logtint::platform::config;
use std::fs;
use std::path::{Path, PathBuf};

// =============================================================================
// Helpers
// =============================================================================

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

fn run_to_string(inputs: &[InputSource], opts: &HighlightOptions) -> String {
    let mut out = Vec::new();
    highlight::run(inputs, opts, &mut out, Path::new("<test>")).unwrap();
    String::from_utf8(out).unwrap()
}

fn options(format: OutputFormat) -> HighlightOptions {
    HighlightOptions {
        format,
        ..HighlightOptions::default()
    }
}

// =============================================================================
// Classification E2E
// =============================================================================

/// The fixture contains well-formed lines plus the known near misses.
#[test]
fn e2e_fixture_counts() {
    let text = fs::read_to_string(fixture("bus_capture.log")).unwrap();
    let summary = classify(&text).summary(&text);

    assert_eq!(summary.timestamps, 4, "truncated fraction is not a timestamp");
    assert_eq!(summary.count(TokenKind::FrameIdHeader), 4);
    assert_eq!(
        summary.count(TokenKind::FrameIdPayload),
        3,
        "lowercase `1a` has no payload"
    );
    assert_eq!(summary.count(TokenKind::DataHeader), 5);
    assert_eq!(summary.count(TokenKind::DataPayload), 5);
    assert_eq!(
        summary.first_timestamp.map(|t| t.to_string()),
        Some("2024-01-15 10:30:00.123456".to_string())
    );
    assert_eq!(
        summary.last_timestamp.map(|t| t.to_string()),
        Some("2024-01-15 10:30:03.999999".to_string())
    );
}

/// Every span lies within the text and on character boundaries, spans are
/// ordered, and the parallel scanner agrees.
#[test]
fn e2e_span_invariants_on_fixture() {
    let text = fs::read_to_string(fixture("bus_capture.log")).unwrap();
    let result = classify(&text);

    let mut previous = None;
    for span in &result {
        assert!(span.start < span.end && span.end <= text.len());
        assert!(text.is_char_boundary(span.start) && text.is_char_boundary(span.end));
        let key = (span.start, span.kind);
        if let Some(prev) = previous {
            assert!(prev <= key, "spans out of order: {prev:?} then {key:?}");
        }
        previous = Some(key);
    }

    assert_eq!(result, classify_parallel(&text));
}

/// Comma-separated bytes: only the first byte is payload.
#[test]
fn e2e_payload_stops_at_punctuation() {
    let text = fs::read_to_string(fixture("bus_capture.log")).unwrap();
    let result = classify(&text);
    let payloads: Vec<&str> = result
        .of_kind(TokenKind::DataPayload)
        .map(|s| s.text(&text))
        .collect();
    assert!(payloads.contains(&"Data: FF"), "payloads: {payloads:?}");
    assert!(payloads.contains(&"Data: 0A\n 0B 0C\n"), "payloads: {payloads:?}");
}

// =============================================================================
// Pipeline E2E
// =============================================================================

/// A directory argument finds the fixture; JSON output carries every span.
#[test]
fn e2e_directory_to_json() {
    let (inputs, warnings) =
        highlight::collect_inputs(&[fixtures_dir()], &DiscoveryConfig::default(), u64::MAX)
            .unwrap();
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    assert_eq!(inputs.len(), 1);

    let out = run_to_string(&inputs, &options(OutputFormat::Json));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let doc = &value[0];
    assert!(doc["source"].as_str().unwrap_or("").ends_with("bus_capture.log"));
    assert_eq!(doc["summary"]["timestamps"], 4);

    let spans = doc["spans"].as_array().unwrap();
    assert_eq!(spans.len(), 4 * 3 + 4 + 3 + 5 + 5);
    assert_eq!(spans[0]["kind"], "date");
    assert_eq!(spans[0]["line"], 0);
    assert_eq!(spans[0]["column"], 1);
}

/// HTML output is a standalone page that preserves the text.
#[test]
fn e2e_file_to_html() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("single.log");
    fs::write(&path, "[2024-01-15 10:30:00.123456] Frame ID: 1A <ack>\n").unwrap();

    let inputs = vec![InputSource::File {
        path,
        discovered: false,
    }];
    let out = run_to_string(&inputs, &options(OutputFormat::Html));
    assert!(out.starts_with("<!DOCTYPE html>"));
    assert!(out.contains("<span class=\"tok-date\">2024-01-15</span>"));
    assert!(out.contains("<span class=\"tok-frame_id_header\">Frame ID:</span>"));
    assert!(out.contains("&lt;ack&gt;"));
    assert!(out.trim_end().ends_with("</html>"));
}

/// CSV output has one row per span plus the header.
#[test]
fn e2e_file_to_csv() {
    let inputs = vec![InputSource::File {
        path: fixture("bus_capture.log"),
        discovered: false,
    }];
    let mut out = Vec::new();
    highlight::run(&inputs, &options(OutputFormat::Csv), &mut out, Path::new("out.csv")).unwrap();

    let mut reader = csv::Reader::from_reader(out.as_slice());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec![
            "source",
            "kind",
            "start",
            "end",
            "char_start",
            "char_end",
            "utf16_start",
            "utf16_end",
            "line",
            "column",
            "text"
        ]
    );
    assert_eq!(reader.records().count(), 4 * 3 + 4 + 3 + 5 + 5);
}

/// ANSI output with colour on strips back to the input.
#[test]
fn e2e_ansi_round_trips_text() {
    let path = fixture("bus_capture.log");
    let text = fs::read_to_string(&path).unwrap();
    let inputs = vec![InputSource::File {
        path,
        discovered: false,
    }];
    let opts = HighlightOptions {
        colour_enabled: true,
        ..options(OutputFormat::Ansi)
    };
    let out = run_to_string(&inputs, &opts);
    let stripped = regex::Regex::new("\x1b\\[[0-9;]*m")
        .unwrap()
        .replace_all(&out, "");
    assert_eq!(stripped, text);
}

// =============================================================================
// Config E2E
// =============================================================================

/// Theme overrides from config.toml reach the rendered HTML.
#[test]
fn e2e_config_theme_reaches_html() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[output]\nformat = \"html\"\n\n[theme.data_payload]\ncolour = \"#123456\"\nitalic = true\n",
    )
    .unwrap();

    let (cfg, warnings) = config::load_config(&config_path);
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    assert_eq!(cfg.format, OutputFormat::Html);

    let log = dir.path().join("a.log");
    fs::write(&log, "Data: 0A").unwrap();
    let opts = HighlightOptions {
        format: cfg.format,
        theme: cfg.theme.clone(),
        ..HighlightOptions::default()
    };
    let out = run_to_string(
        &[InputSource::File {
            path: log,
            discovered: false,
        }],
        &opts,
    );
    assert!(out.contains(".tok-data_payload { color:#123456;font-style:italic; }"));
}

/// Discovery limits from config.toml apply to directory arguments.
#[test]
fn e2e_config_discovery_patterns() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[discovery]\ninclude_patterns = [\"*.txt\"]\n",
    )
    .unwrap();
    let logs = dir.path().join("logs");
    fs::create_dir(&logs).unwrap();
    fs::write(logs.join("a.log"), "Data: 01").unwrap();
    fs::write(logs.join("b.txt"), "Data: 02").unwrap();

    let (cfg, _) = config::load_config(&config_path);
    let (inputs, _) =
        highlight::collect_inputs(&[logs], &cfg.discovery, cfg.max_file_size).unwrap();
    let names: Vec<String> = inputs.iter().map(|i| i.display_name()).collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].ends_with("b.txt"));
}
