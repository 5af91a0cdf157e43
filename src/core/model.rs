// LogTint - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers: the classifier
// produces them, renderers and exporters consume them.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::PathBuf;

// =============================================================================
// Token kinds
// =============================================================================

/// Closed set of classification categories.
///
/// Declaration order is significant: it breaks ordering ties between spans
/// that start at the same offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TokenKind {
    DateField,
    TimeField,
    MillisecondField,
    FrameIdHeader,
    DataHeader,
    FrameIdPayload,
    DataPayload,
}

impl TokenKind {
    /// Number of variants.
    pub const COUNT: usize = 7;

    /// Returns all variants in declaration order.
    pub fn all() -> &'static [TokenKind; Self::COUNT] {
        &[
            TokenKind::DateField,
            TokenKind::TimeField,
            TokenKind::MillisecondField,
            TokenKind::FrameIdHeader,
            TokenKind::DataHeader,
            TokenKind::FrameIdPayload,
            TokenKind::DataPayload,
        ]
    }

    /// Position of this kind in `all()`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-readable label for display and export.
    pub fn label(&self) -> &'static str {
        match self {
            TokenKind::DateField => "Date",
            TokenKind::TimeField => "Time",
            TokenKind::MillisecondField => "Milliseconds",
            TokenKind::FrameIdHeader => "Frame ID header",
            TokenKind::DataHeader => "Data header",
            TokenKind::FrameIdPayload => "Frame ID payload",
            TokenKind::DataPayload => "Data payload",
        }
    }

    /// Key used for this kind in config.toml `[theme.<key>]` tables and as
    /// the HTML class suffix.
    pub fn config_key(&self) -> &'static str {
        match self {
            TokenKind::DateField => "date",
            TokenKind::TimeField => "time",
            TokenKind::MillisecondField => "milliseconds",
            TokenKind::FrameIdHeader => "frame_id_header",
            TokenKind::DataHeader => "data_header",
            TokenKind::FrameIdPayload => "frame_id_payload",
            TokenKind::DataPayload => "data_payload",
        }
    }

    /// Look up a kind by its `config_key`.
    pub fn from_config_key(key: &str) -> Option<TokenKind> {
        Self::all().iter().copied().find(|k| k.config_key() == key)
    }

    /// True for the three parts of a bracketed timestamp.
    pub fn is_timestamp_part(&self) -> bool {
        matches!(
            self,
            TokenKind::DateField | TokenKind::TimeField | TokenKind::MillisecondField
        )
    }

    /// Literal prefix carried at the start of a payload span.
    pub fn payload_prefix(&self) -> Option<&'static str> {
        match self {
            TokenKind::FrameIdPayload => Some("Frame ID: "),
            TokenKind::DataPayload => Some("Data: "),
            _ => None,
        }
    }

    /// Which style wins where spans overlap when painting. Higher wins.
    ///
    /// Headers sit inside their payload spans and must stay visible.
    pub fn paint_priority(&self) -> u8 {
        match self {
            TokenKind::FrameIdHeader | TokenKind::DataHeader => 3,
            TokenKind::DateField | TokenKind::TimeField | TokenKind::MillisecondField => 2,
            TokenKind::FrameIdPayload | TokenKind::DataPayload => 1,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Spans
// =============================================================================

/// Half-open byte range `[start, end)` into a log text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} > end {end}");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The covered substring, or `None` if the span does not fit `text`.
    pub fn slice<'t>(&self, text: &'t str) -> Option<&'t str> {
        text.get(self.start..self.end)
    }
}

/// A span tagged with its token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ClassifiedSpan {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl ClassifiedSpan {
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} > end {end}");
        Self { kind, start, end }
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// The covered substring. Empty if the span does not belong to `text`.
    pub fn text<'t>(&self, text: &'t str) -> &'t str {
        self.span().slice(text).unwrap_or("")
    }

    /// For payload spans, the range after the `Frame ID: ` / `Data: ` prefix.
    ///
    /// Payload spans include their header prefix; callers that only want the
    /// hex body use this.
    pub fn payload_body(&self) -> Option<Span> {
        let prefix = self.kind.payload_prefix()?;
        let start = (self.start + prefix.len()).min(self.end);
        Some(Span::new(start, self.end))
    }
}

// =============================================================================
// Classification result
// =============================================================================

/// Ordered spans produced by one classification call.
///
/// Ordering: ascending `start`, ties broken by `TokenKind` declaration order.
/// Spans of different kinds may overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassificationResult {
    spans: Vec<ClassifiedSpan>,
}

impl ClassificationResult {
    /// Build a result from spans in any order, applying the ordering rule.
    pub fn from_unsorted(mut spans: Vec<ClassifiedSpan>) -> Self {
        // Stable sort; within one pass spans never share a start.
        spans.sort_by_key(|s| (s.start, s.kind));
        Self { spans }
    }

    pub fn spans(&self) -> &[ClassifiedSpan] {
        &self.spans
    }

    pub fn into_spans(self) -> Vec<ClassifiedSpan> {
        self.spans
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClassifiedSpan> {
        self.spans.iter()
    }

    /// Spans of one kind, in order.
    pub fn of_kind(&self, kind: TokenKind) -> impl Iterator<Item = &ClassifiedSpan> + '_ {
        self.spans.iter().filter(move |s| s.kind == kind)
    }

    /// Regroup the timestamp parts into one entry per bracketed timestamp.
    pub fn timestamps(&self) -> Vec<TimestampOccurrence> {
        let mut out = Vec::new();
        let mut date: Option<Span> = None;
        let mut time: Option<Span> = None;

        for s in self.spans.iter().filter(|s| s.kind.is_timestamp_part()) {
            match s.kind {
                TokenKind::DateField => {
                    date = Some(s.span());
                    time = None;
                }
                TokenKind::TimeField => time = date.and(Some(s.span())),
                TokenKind::MillisecondField => {
                    if let (Some(d), Some(t)) = (date.take(), time.take()) {
                        out.push(TimestampOccurrence {
                            date: d,
                            time: t,
                            fraction: s.span(),
                        });
                    }
                }
                _ => {}
            }
        }
        out
    }

    /// Per-kind counts and the covered time range.
    pub fn summary(&self, text: &str) -> ClassificationSummary {
        let mut counts = [0usize; TokenKind::COUNT];
        for s in &self.spans {
            counts[s.kind.index()] += 1;
        }

        let occurrences = self.timestamps();
        let mut first: Option<NaiveDateTime> = None;
        let mut last: Option<NaiveDateTime> = None;
        for ts in occurrences.iter().filter_map(|o| o.to_datetime(text)) {
            first = Some(first.map_or(ts, |f| f.min(ts)));
            last = Some(last.map_or(ts, |l| l.max(ts)));
        }

        ClassificationSummary {
            counts: TokenKind::all()
                .iter()
                .map(|k| KindCount {
                    kind: *k,
                    count: counts[k.index()],
                })
                .collect(),
            timestamps: occurrences.len(),
            first_timestamp: first,
            last_timestamp: last,
        }
    }
}

impl<'a> IntoIterator for &'a ClassificationResult {
    type Item = &'a ClassifiedSpan;
    type IntoIter = std::slice::Iter<'a, ClassifiedSpan>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.iter()
    }
}

// =============================================================================
// Timestamps
// =============================================================================

/// The three parts of one `[YYYY-MM-DD HH:MM:SS.ffffff]` occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampOccurrence {
    pub date: Span,
    pub time: Span,
    pub fraction: Span,
}

impl TimestampOccurrence {
    /// Parse the occurrence into a calendar value.
    ///
    /// Returns `None` when the digits do not form a real date or time
    /// (e.g. month 13); the classifier matches shape only.
    pub fn to_datetime(&self, text: &str) -> Option<NaiveDateTime> {
        let raw = format!(
            "{} {}.{}",
            self.date.slice(text)?,
            self.time.slice(text)?,
            self.fraction.slice(text)?
        );
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f").ok()
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Count of spans for one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KindCount {
    pub kind: TokenKind,
    pub count: usize,
}

/// Aggregate statistics for one classified document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationSummary {
    /// One entry per kind, in declaration order.
    pub counts: Vec<KindCount>,
    /// Number of complete bracketed timestamps.
    pub timestamps: usize,
    /// Earliest valid timestamp, if any.
    pub first_timestamp: Option<NaiveDateTime>,
    /// Latest valid timestamp, if any.
    pub last_timestamp: Option<NaiveDateTime>,
}

impl ClassificationSummary {
    pub fn count(&self, kind: TokenKind) -> usize {
        self.counts
            .iter()
            .find(|c| c.kind == kind)
            .map_or(0, |c| c.count)
    }
}

// =============================================================================
// Documents
// =============================================================================

/// A named text together with its classification.
///
/// `source` is a display name: a file path, or "-" for stdin.
#[derive(Debug, Clone)]
pub struct ClassifiedDocument {
    pub source: String,
    pub text: String,
    pub result: ClassificationResult,
}

// =============================================================================
// Discovered file
// =============================================================================

/// A log file found under a directory argument.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Absolute or root-relative path to the file.
    pub path: PathBuf,

    /// File size in bytes.
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_order_matches_declaration() {
        let all = TokenKind::all();
        for pair in all.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        for (i, k) in all.iter().enumerate() {
            assert_eq!(k.index(), i);
        }
    }

    #[test]
    fn test_config_key_round_trip() {
        for k in TokenKind::all() {
            assert_eq!(TokenKind::from_config_key(k.config_key()), Some(*k));
        }
        assert_eq!(TokenKind::from_config_key("nope"), None);
    }

    #[test]
    fn test_from_unsorted_orders_by_start_then_kind() {
        let result = ClassificationResult::from_unsorted(vec![
            ClassifiedSpan::new(TokenKind::FrameIdPayload, 5, 20),
            ClassifiedSpan::new(TokenKind::DateField, 1, 11),
            ClassifiedSpan::new(TokenKind::FrameIdHeader, 5, 14),
        ]);
        let kinds: Vec<_> = result.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::DateField,
                TokenKind::FrameIdHeader,
                TokenKind::FrameIdPayload
            ]
        );
    }

    #[test]
    fn test_payload_body_skips_prefix() {
        let text = "Data: FF 00";
        let span = ClassifiedSpan::new(TokenKind::DataPayload, 0, text.len());
        let body = span.payload_body().unwrap();
        assert_eq!(body.slice(text), Some("FF 00"));
        assert!(ClassifiedSpan::new(TokenKind::DataHeader, 0, 5)
            .payload_body()
            .is_none());
    }

    #[test]
    fn test_timestamp_to_datetime_rejects_invalid_calendar() {
        let text = "2024-13-40 10:30:00 123456";
        let occ = TimestampOccurrence {
            date: Span::new(0, 10),
            time: Span::new(11, 19),
            fraction: Span::new(20, 26),
        };
        assert!(occ.to_datetime(text).is_none());
    }

    #[test]
    fn test_summary_counts_and_range() {
        let text = "2024-01-15 10:30:00 123456\n2024-01-14 09:00:00 000001";
        let result = ClassificationResult::from_unsorted(vec![
            ClassifiedSpan::new(TokenKind::DateField, 0, 10),
            ClassifiedSpan::new(TokenKind::TimeField, 11, 19),
            ClassifiedSpan::new(TokenKind::MillisecondField, 20, 26),
            ClassifiedSpan::new(TokenKind::DateField, 27, 37),
            ClassifiedSpan::new(TokenKind::TimeField, 38, 46),
            ClassifiedSpan::new(TokenKind::MillisecondField, 47, 53),
        ]);
        let summary = result.summary(text);
        assert_eq!(summary.timestamps, 2);
        assert_eq!(summary.count(TokenKind::DateField), 2);
        assert_eq!(summary.count(TokenKind::DataPayload), 0);
        let first = summary.first_timestamp.unwrap();
        let last = summary.last_timestamp.unwrap();
        assert!(first < last);
        assert_eq!(first.format("%Y-%m-%d").to_string(), "2024-01-14");
    }
}
