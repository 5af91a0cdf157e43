// LogTint - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::discovery::DiscoveryConfig;
use crate::core::model::TokenKind;
use crate::core::render::{ColourMode, OutputFormat};
use crate::core::style::{Rgb, Theme, TokenStyle};
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogTint configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logtint/ or %APPDATA%\LogTint\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml shape
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[output]` section.
    pub output: OutputSection,
    /// `[classifier]` section.
    pub classifier: ClassifierSection,
    /// `[input]` section.
    pub input: InputSection,
    /// `[discovery]` section.
    pub discovery: DiscoverySection,
    /// `[theme.<kind>]` tables.
    pub theme: BTreeMap<String, StyleSection>,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[output]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// "ansi", "html", "json", "csv" or "plain".
    pub format: Option<String>,
    /// "auto", "always" or "never".
    pub colour: Option<String>,
}

/// `[classifier]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ClassifierSection {
    /// Text size above which the scans run in parallel.
    pub parallel_threshold_bytes: Option<usize>,
}

/// `[input]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Files larger than this are skipped.
    pub max_file_size_bytes: Option<u64>,
}

/// `[discovery]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DiscoverySection {
    pub max_depth: Option<usize>,
    pub max_files: Option<usize>,
    pub include_patterns: Option<Vec<String>>,
    pub exclude_patterns: Option<Vec<String>>,
}

/// `[theme.<kind>]` table. Omitted fields keep the default style's value.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct StyleSection {
    /// `#RRGGBB`.
    pub colour: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Dark (true) or light (false) viewer visuals.
    pub dark_mode: Option<bool>,
    /// Viewer font size in points.
    pub font_size: Option<f32>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

// =============================================================================
// Validated configuration
// =============================================================================

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Output --
    pub format: OutputFormat,
    pub colour: ColourMode,

    // -- Classifier / input --
    pub parallel_threshold: usize,
    pub max_file_size: u64,

    // -- Discovery --
    pub discovery: DiscoveryConfig,

    // -- Styling --
    pub theme: Theme,
    /// Viewer dark mode (true) or light mode (false).
    pub dark_mode: bool,
    /// Viewer font size in points.
    pub font_size: f32,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            colour: ColourMode::default(),
            parallel_threshold: constants::DEFAULT_PARALLEL_THRESHOLD,
            max_file_size: constants::DEFAULT_MAX_FILE_SIZE,
            discovery: DiscoveryConfig::default(),
            theme: Theme::default(),
            dark_mode: true,
            font_size: constants::DEFAULT_FONT_SIZE,
            log_level: None,
        }
    }
}

/// Load and validate a config file.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// A missing file yields defaults with no warnings (first run). An unreadable
/// or unparseable file yields defaults plus a warning: the run continues but
/// the user is told.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    match read_config(config_path) {
        Ok(content) => parse_config(&content, config_path),
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            (AppConfig::default(), vec![msg])
        }
    }
}

/// Read a config file that must exist (an explicit `--config` path).
pub fn read_config(config_path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(config_path).map_err(|source| ConfigError::Io {
        path: config_path.to_path_buf(),
        source,
    })
}

/// Validate config.toml content. `source` is only used in messages.
pub fn parse_config(content: &str, source: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    let raw: RawConfig = match toml::from_str(content) {
        Ok(r) => r,
        Err(e) => {
            let err = ConfigError::TomlParse {
                path: source.to_path_buf(),
                source: e,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %source.display(), "Loaded config.toml");

    let mut config = AppConfig::default();
    let mut out_of_range = |field: &str, value: String, expected: String| {
        warnings.push(
            ConfigError::ValueOutOfRange {
                field: field.to_string(),
                value,
                expected,
            }
            .to_string(),
        );
    };

    // -- Output --
    if let Some(ref format) = raw.output.format {
        match format.parse::<OutputFormat>() {
            Ok(f) => config.format = f,
            Err(_) => out_of_range(
                "output.format",
                format.clone(),
                "ansi, html, json, csv or plain".to_string(),
            ),
        }
    }
    if let Some(ref colour) = raw.output.colour {
        match colour.parse::<ColourMode>() {
            Ok(c) => config.colour = c,
            Err(_) => out_of_range(
                "output.colour",
                colour.clone(),
                "auto, always or never".to_string(),
            ),
        }
    }

    // -- Classifier --
    if let Some(threshold) = raw.classifier.parallel_threshold_bytes {
        if (constants::MIN_PARALLEL_THRESHOLD..=constants::MAX_PARALLEL_THRESHOLD)
            .contains(&threshold)
        {
            config.parallel_threshold = threshold;
        } else {
            out_of_range(
                "classifier.parallel_threshold_bytes",
                threshold.to_string(),
                format!(
                    "{}-{}",
                    constants::MIN_PARALLEL_THRESHOLD,
                    constants::MAX_PARALLEL_THRESHOLD
                ),
            );
        }
    }

    // -- Input --
    if let Some(size) = raw.input.max_file_size_bytes {
        if (constants::MIN_MAX_FILE_SIZE..=constants::ABSOLUTE_MAX_FILE_SIZE).contains(&size) {
            config.max_file_size = size;
        } else {
            out_of_range(
                "input.max_file_size_bytes",
                size.to_string(),
                format!(
                    "{}-{}",
                    constants::MIN_MAX_FILE_SIZE,
                    constants::ABSOLUTE_MAX_FILE_SIZE
                ),
            );
        }
    }

    // -- Discovery --
    if let Some(depth) = raw.discovery.max_depth {
        if (1..=constants::ABSOLUTE_MAX_DEPTH).contains(&depth) {
            config.discovery.max_depth = depth;
        } else {
            out_of_range(
                "discovery.max_depth",
                depth.to_string(),
                format!("1-{}", constants::ABSOLUTE_MAX_DEPTH),
            );
        }
    }
    if let Some(files) = raw.discovery.max_files {
        if (constants::MIN_MAX_FILES..=constants::ABSOLUTE_MAX_FILES).contains(&files) {
            config.discovery.max_files = files;
        } else {
            out_of_range(
                "discovery.max_files",
                files.to_string(),
                format!(
                    "{}-{}",
                    constants::MIN_MAX_FILES,
                    constants::ABSOLUTE_MAX_FILES
                ),
            );
        }
    }
    if let Some(patterns) = raw.discovery.include_patterns {
        config.discovery.include_patterns = patterns;
    }
    if let Some(patterns) = raw.discovery.exclude_patterns {
        config.discovery.exclude_patterns = patterns;
    }

    // -- Theme overrides --
    for (key, section) in &raw.theme {
        let Some(kind) = TokenKind::from_config_key(key) else {
            let known: Vec<&str> = TokenKind::all().iter().map(|k| k.config_key()).collect();
            out_of_range(&format!("theme.{key}"), key.clone(), known.join(", "));
            continue;
        };

        let mut style: TokenStyle = *config.theme.style(kind);
        if let Some(ref hex) = section.colour {
            match Rgb::from_hex(hex) {
                Some(rgb) => style.colour = rgb,
                None => out_of_range(
                    &format!("theme.{key}.colour"),
                    hex.clone(),
                    "#RRGGBB".to_string(),
                ),
            }
        }
        if let Some(bold) = section.bold {
            style.bold = bold;
        }
        if let Some(italic) = section.italic {
            style.italic = italic;
        }
        config.theme.set_style(kind, style);
    }

    // -- UI --
    if let Some(dark_mode) = raw.ui.dark_mode {
        config.dark_mode = dark_mode;
    }
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            out_of_range(
                "ui.font_size",
                size.to_string(),
                format!("{}-{}", constants::MIN_FONT_SIZE, constants::MAX_FONT_SIZE),
            );
        }
    }

    // -- Logging --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            out_of_range(
                "logging.level",
                level.clone(),
                valid.join(", "),
            );
        }
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> (AppConfig, Vec<String>) {
        parse_config(content, Path::new("config.toml"))
    }

    #[test]
    fn test_empty_config_is_default() {
        let (config, warnings) = parse("");
        assert!(warnings.is_empty());
        assert_eq!(config.format, OutputFormat::Ansi);
        assert_eq!(config.colour, ColourMode::Auto);
        assert_eq!(config.theme, Theme::default());
        assert_eq!(config.parallel_threshold, constants::DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    fn test_valid_values_applied() {
        let (config, warnings) = parse(
            r##"
            [output]
            format = "html"
            colour = "never"

            [classifier]
            parallel_threshold_bytes = 1048576

            [input]
            max_file_size_bytes = 2048

            [discovery]
            max_depth = 3
            include_patterns = ["*.log", "*.txt"]

            [theme.data_header]
            colour = "#112233"
            bold = false

            [ui]
            dark_mode = false
            font_size = 16.0

            [logging]
            level = "DEBUG"
            "##,
        );
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.format, OutputFormat::Html);
        assert_eq!(config.colour, ColourMode::Never);
        assert_eq!(config.parallel_threshold, 1_048_576);
        assert_eq!(config.max_file_size, 2048);
        assert_eq!(config.discovery.max_depth, 3);
        assert_eq!(config.discovery.include_patterns, vec!["*.log", "*.txt"]);
        let style = config.theme.style(TokenKind::DataHeader);
        assert_eq!(style.colour, Rgb::new(0x11, 0x22, 0x33));
        assert!(!style.bold);
        assert!(!config.dark_mode);
        assert_eq!(config.font_size, 16.0);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_invalid_values_warn_and_fall_back() {
        let (config, warnings) = parse(
            r##"
            [output]
            format = "pdf"

            [discovery]
            max_depth = 0

            [theme.date]
            colour = "blue"

            [theme.sparkles]
            bold = true

            [ui]
            font_size = 99.0
            "##,
        );
        assert_eq!(warnings.len(), 5, "warnings: {warnings:?}");
        assert_eq!(config.format, OutputFormat::Ansi);
        assert_eq!(config.discovery.max_depth, constants::DEFAULT_MAX_DEPTH);
        assert_eq!(config.theme, Theme::default());
        assert_eq!(config.font_size, constants::DEFAULT_FONT_SIZE);
        assert!(warnings.iter().any(|w| w.contains("theme.sparkles")));
    }

    #[test]
    fn test_unparseable_toml_warns() {
        let (config, warnings) = parse("[output\nformat = ");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Config parse error"));
        assert_eq!(config.format, OutputFormat::Ansi);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let (_, warnings) = parse("[future]\nsetting = 1\n[output]\nextra = true\n");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_silent() {
        let (config, warnings) = load_config(Path::new("/nonexistent/logtint/config.toml"));
        assert!(warnings.is_empty());
        assert_eq!(config.format, OutputFormat::Ansi);
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\nformat = \"json\"\n").unwrap();
        let (config, warnings) = load_config(&path);
        assert!(warnings.is_empty());
        assert_eq!(config.format, OutputFormat::Json);
    }
}
