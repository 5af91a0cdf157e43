// LogTint - core/segment.rs
//
// Flatten overlapping classified spans into paintable segments.
//
// Renderers cannot apply two styles to one character, so the overlapping
// classifier output is swept once: at every span boundary the per-kind
// active counts are updated and the active kind with the highest
// `paint_priority` owns the segment up to the next boundary.

use crate::core::model::{ClassificationResult, TokenKind};

/// A contiguous byte range painted with one style (or unstyled).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    pub kind: Option<TokenKind>,
}

/// Cover `[0, text_len)` with non-overlapping segments, in order.
///
/// Adjacent segments always differ in `kind`. Empty spans are ignored and
/// spans are clamped to `text_len`.
pub fn flatten(text_len: usize, result: &ClassificationResult) -> Vec<Segment> {
    if text_len == 0 {
        return Vec::new();
    }

    // (offset, delta, kind): +1 opens a span, -1 closes it.
    let mut events: Vec<(usize, i32, TokenKind)> = Vec::with_capacity(result.len() * 2);
    let mut boundaries: Vec<usize> = Vec::with_capacity(result.len() * 2 + 2);
    boundaries.push(0);
    boundaries.push(text_len);

    for s in result {
        let start = s.start.min(text_len);
        let end = s.end.min(text_len);
        if start >= end {
            continue;
        }
        events.push((start, 1, s.kind));
        events.push((end, -1, s.kind));
        boundaries.push(start);
        boundaries.push(end);
    }

    events.sort_unstable_by_key(|e| e.0);
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut active = [0i32; TokenKind::COUNT];
    let mut pending = events.iter().peekable();
    let mut segments: Vec<Segment> = Vec::new();

    for window in boundaries.windows(2) {
        let (start, end) = (window[0], window[1]);

        while let Some(&&(offset, delta, kind)) = pending.peek() {
            if offset > start {
                break;
            }
            active[kind.index()] += delta;
            pending.next();
        }

        let kind = TokenKind::all()
            .iter()
            .copied()
            .filter(|k| active[k.index()] > 0)
            .max_by_key(|k| k.paint_priority());

        match segments.last_mut() {
            Some(last) if last.kind == kind && last.end == start => last.end = end,
            _ => segments.push(Segment { start, end, kind }),
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::classify;

    fn painted<'t>(text: &'t str, segments: &[Segment]) -> Vec<(Option<TokenKind>, &'t str)> {
        segments
            .iter()
            .map(|s| (s.kind, &text[s.start..s.end]))
            .collect()
    }

    #[test]
    fn test_empty_text() {
        assert!(flatten(0, &ClassificationResult::default()).is_empty());
    }

    #[test]
    fn test_no_spans_single_plain_segment() {
        let segs = flatten(5, &ClassificationResult::default());
        assert_eq!(
            segs,
            vec![Segment {
                start: 0,
                end: 5,
                kind: None
            }]
        );
    }

    #[test]
    fn test_header_wins_over_payload() {
        let text = "Frame ID: 1A 2B Data: FF 00";
        let segs = flatten(text.len(), &classify(text));
        assert_eq!(
            painted(text, &segs),
            vec![
                (Some(TokenKind::FrameIdHeader), "Frame ID:"),
                (Some(TokenKind::FrameIdPayload), " 1A 2B "),
                (Some(TokenKind::DataHeader), "Data:"),
                (Some(TokenKind::DataPayload), " FF 00"),
            ]
        );
    }

    #[test]
    fn test_timestamp_parts_with_plain_gaps() {
        let text = "[2024-01-15 10:30:00.123456] x";
        let segs = flatten(text.len(), &classify(text));
        assert_eq!(
            painted(text, &segs),
            vec![
                (None, "["),
                (Some(TokenKind::DateField), "2024-01-15"),
                (None, " "),
                (Some(TokenKind::TimeField), "10:30:00"),
                (None, "."),
                (Some(TokenKind::MillisecondField), "123456"),
                (None, "] x"),
            ]
        );
    }

    #[test]
    fn test_segments_cover_text_contiguously() {
        let text = "pre [2024-01-15 10:30:00.123456] Frame ID: 01 Data: 02\ntail";
        let segs = flatten(text.len(), &classify(text));
        assert_eq!(segs.first().map(|s| s.start), Some(0));
        assert_eq!(segs.last().map(|s| s.end), Some(text.len()));
        for pair in segs.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
            assert_ne!(pair[0].kind, pair[1].kind);
        }
    }
}
