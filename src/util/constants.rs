// LogTint - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.
// Anything a user can tune through config.toml has its default and its
// allowed range declared here.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogTint";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogTint";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Token literals
// =============================================================================

/// Literal header that introduces a frame identifier.
pub const FRAME_ID_HEADER: &str = "Frame ID:";

/// Literal header that introduces a data payload.
pub const DATA_HEADER: &str = "Data:";

/// Opening delimiter of a bracketed timestamp.
pub const TIMESTAMP_OPEN: &str = "[";

/// Separator between the date and time parts of a timestamp.
pub const TIMESTAMP_DATE_TIME_SEP: &str = " ";

/// Separator between the time part and the sub-second digits.
pub const TIMESTAMP_FRACTION_SEP: &str = ".";

/// Closing delimiter of a bracketed timestamp.
pub const TIMESTAMP_CLOSE: &str = "]";

// =============================================================================
// Classifier limits
// =============================================================================

/// Text size in bytes above which the CLI switches to the parallel scan.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4 * 1024 * 1024; // 4 MB

/// Minimum user-configurable parallel threshold.
pub const MIN_PARALLEL_THRESHOLD: usize = 64 * 1024; // 64 KB

/// Maximum user-configurable parallel threshold.
pub const MAX_PARALLEL_THRESHOLD: usize = 1024 * 1024 * 1024; // 1 GB

// =============================================================================
// Input limits
// =============================================================================

/// Largest input file classified by default. Larger files are skipped
/// with a warning rather than loaded into memory.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 512 * 1024 * 1024; // 512 MB

/// Minimum user-configurable maximum file size.
pub const MIN_MAX_FILE_SIZE: u64 = 1024; // 1 KB

/// Hard upper bound on the user-configurable maximum file size.
pub const ABSOLUTE_MAX_FILE_SIZE: u64 = 4 * 1024 * 1024 * 1024; // 4 GB

/// File size above which input is read through a memory map.
pub const MMAP_THRESHOLD: u64 = 16 * 1024 * 1024; // 16 MB

// =============================================================================
// Discovery limits
// =============================================================================

/// Maximum directory recursion depth during discovery.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Hard upper bound on max depth (prevents runaway traversal).
pub const ABSOLUTE_MAX_DEPTH: usize = 50;

/// Maximum number of files to highlight from a single directory argument.
pub const DEFAULT_MAX_FILES: usize = 500;

/// Minimum sensible value for the max-files limit.
pub const MIN_MAX_FILES: usize = 1;

/// Hard upper bound on max files.
pub const ABSOLUTE_MAX_FILES: usize = 10_000;

/// Default include glob patterns. Matches the log-document trigger of
/// editor hosts.
pub const DEFAULT_INCLUDE_PATTERNS: &[&str] = &["*.log"];

/// Default exclude glob patterns.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &["*.gz", "*.zip", ".git", "node_modules"];

// =============================================================================
// UI defaults
// =============================================================================

/// Default viewer font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Minimum user-configurable viewer font size (points).
pub const MIN_FONT_SIZE: f32 = 8.0;

/// Maximum user-configurable viewer font size (points).
pub const MAX_FONT_SIZE: f32 = 32.0;

/// Initial viewer window size.
pub const VIEWER_WINDOW_SIZE: [f32; 2] = [1100.0, 750.0];

/// Minimum viewer window size.
pub const VIEWER_MIN_WINDOW_SIZE: [f32; 2] = [500.0, 300.0];

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum length of log content included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Export
// =============================================================================

/// Default title of a standalone HTML export.
pub const DEFAULT_HTML_TITLE: &str = "LogTint";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
