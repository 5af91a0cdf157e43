// LogTint - app/state.rs
//
// Viewer state: the open document, its flattened segments, display
// settings and status text. Owned by the eframe::App implementation.

use crate::app::load::LoadLimits;
use crate::core::model::{ClassificationSummary, ClassifiedDocument};
use crate::core::position;
use crate::core::segment::Segment;
use crate::core::style::Theme;
use crate::platform::config::AppConfig;
use crate::util::constants;
use std::ops::Range;
use std::path::PathBuf;
use std::time::Duration;

/// Top-level viewer state.
#[derive(Debug)]
pub struct ViewerState {
    /// File to open on the next frame (CLI argument or file dialog).
    pub pending_open: Option<PathBuf>,

    /// Whether a load is running.
    pub loading: bool,

    /// The displayed document, if any.
    pub document: Option<ClassifiedDocument>,

    /// Non-overlapping coloured runs covering the whole document text.
    pub segments: Vec<Segment>,

    /// Byte offset of the start of each line of the document.
    pub line_starts: Vec<usize>,

    /// Summary of the displayed document.
    pub summary: Option<ClassificationSummary>,

    /// Bumped for every newly installed document; keys the viewer's scroll
    /// position so a new file opens at the top.
    pub revision: u64,

    pub theme: Theme,
    pub font_size: f32,
    pub dark_mode: bool,
    pub limits: LoadLimits,

    /// Status message for the status bar.
    pub status_message: String,

    /// Whether to show the summary window.
    pub show_summary: bool,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl ViewerState {
    pub fn new(config: &AppConfig, debug_mode: bool) -> Self {
        Self {
            pending_open: None,
            loading: false,
            document: None,
            segments: Vec::new(),
            line_starts: Vec::new(),
            summary: None,
            revision: 0,
            theme: config.theme.clone(),
            font_size: config.font_size,
            dark_mode: config.dark_mode,
            limits: LoadLimits {
                max_file_size: config.max_file_size,
                parallel_threshold: config.parallel_threshold,
            },
            status_message: "Open a log file to begin.".to_string(),
            show_summary: false,
            debug_mode,
        }
    }

    /// Mark a load as started.
    pub fn begin_load(&mut self, path: &std::path::Path) {
        self.loading = true;
        self.status_message = format!("Loading {}...", path.display());
    }

    /// Install a freshly loaded document.
    pub fn set_document(
        &mut self,
        document: ClassifiedDocument,
        segments: Vec<Segment>,
        duration: Duration,
    ) {
        let summary = document.result.summary(&document.text);
        self.status_message = format!(
            "{}: {} spans, {} timestamps in {:.2}s",
            document.source,
            document.result.len(),
            summary.timestamps,
            duration.as_secs_f64()
        );
        self.line_starts = position::line_starts(&document.text);
        self.document = Some(document);
        self.segments = segments;
        self.summary = Some(summary);
        self.loading = false;
        self.revision += 1;
    }

    /// Record a failed load. The previous document stays visible.
    pub fn load_failed(&mut self, error: &str) {
        self.loading = false;
        self.status_message = format!("Load failed: {error}");
    }

    /// Change the font size within the supported range.
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size.clamp(constants::MIN_FONT_SIZE, constants::MAX_FONT_SIZE);
    }

    /// Number of displayed lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte range of line `index`, without its line terminator.
    pub fn line_range(&self, index: usize) -> Option<Range<usize>> {
        let text = &self.document.as_ref()?.text;
        let start = *self.line_starts.get(index)?;
        let end = match self.line_starts.get(index + 1) {
            Some(&next) => next,
            None => text.len(),
        };
        let line = &text[start..end];
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        Some(start..start + line.len())
    }

    /// Display name of the open document.
    pub fn title(&self) -> Option<&str> {
        self.document.as_ref().map(|d| d.source.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::classify;
    use crate::core::segment::flatten;

    fn loaded_state() -> ViewerState {
        let mut state = ViewerState::new(&AppConfig::default(), false);
        let text = "[2024-01-15 10:30:00.123456] Frame ID: 1A".to_string();
        let result = classify(&text);
        let segments = flatten(text.len(), &result);
        state.set_document(
            ClassifiedDocument {
                source: "a.log".to_string(),
                text,
                result,
            },
            segments,
            Duration::from_millis(5),
        );
        state
    }

    #[test]
    fn test_set_document_updates_summary_and_revision() {
        let state = loaded_state();
        assert_eq!(state.revision, 1);
        assert_eq!(state.title(), Some("a.log"));
        assert_eq!(state.summary.as_ref().map(|s| s.timestamps), Some(1));
        assert!(state.status_message.starts_with("a.log: 5 spans"));
        assert!(!state.loading);
    }

    #[test]
    fn test_failed_load_keeps_document() {
        let mut state = loaded_state();
        state.begin_load(std::path::Path::new("b.log"));
        assert!(state.loading);
        state.load_failed("boom");
        assert!(!state.loading);
        assert_eq!(state.title(), Some("a.log"));
        assert_eq!(state.status_message, "Load failed: boom");
    }

    #[test]
    fn test_line_ranges() {
        let mut state = ViewerState::new(&AppConfig::default(), false);
        let text = "Data: 01\r\nFrame ID: 02\n\nlast".to_string();
        let result = classify(&text);
        let segments = flatten(text.len(), &result);
        state.set_document(
            ClassifiedDocument {
                source: "crlf.log".to_string(),
                text,
                result,
            },
            segments,
            Duration::ZERO,
        );
        assert_eq!(state.line_count(), 4);
        assert_eq!(state.line_range(0), Some(0..8));
        assert_eq!(state.line_range(1), Some(10..22));
        assert_eq!(state.line_range(2), Some(23..23));
        assert_eq!(state.line_range(3), Some(24..28));
        assert_eq!(state.line_range(4), None);
    }

    #[test]
    fn test_bare_carriage_return_splits_rows() {
        let mut state = ViewerState::new(&AppConfig::default(), false);
        let text = "Data: 00 x\r".repeat(3);
        let result = classify(&text);
        let segments = flatten(text.len(), &result);
        state.set_document(
            ClassifiedDocument {
                source: "cr.log".to_string(),
                text,
                result,
            },
            segments,
            Duration::ZERO,
        );
        assert_eq!(state.line_count(), 4);
        assert_eq!(state.line_range(0), Some(0..10));
        assert_eq!(state.line_range(1), Some(11..21));
        assert_eq!(state.line_range(2), Some(22..32));
        assert_eq!(state.line_range(3), Some(33..33));
    }

    #[test]
    fn test_font_size_clamped() {
        let mut state = ViewerState::new(&AppConfig::default(), false);
        state.set_font_size(1000.0);
        assert_eq!(state.font_size, constants::MAX_FONT_SIZE);
        state.set_font_size(0.0);
        assert_eq!(state.font_size, constants::MIN_FONT_SIZE);
    }
}
