// LogTint - ui/panels/viewer.rs
//
// Virtual-scrolling highlighted text view.
//
// Uses egui's `ScrollArea::show_rows` so only the lines currently visible
// are laid out, whatever the size of the file. Each visible line becomes
// one LayoutJob built from the segments that intersect it.

use crate::app::state::ViewerState;
use crate::core::segment::Segment;
use crate::core::style::Theme;
use crate::ui::theme;
use egui::text::LayoutJob;
use std::ops::Range;

/// Render the viewer panel (central area).
pub fn render(ui: &mut egui::Ui, state: &ViewerState) {
    let Some(ref document) = state.document else {
        ui.centered_and_justified(|ui| {
            if state.loading {
                ui.spinner();
            } else {
                ui.label("No file loaded.\nOpen one via File \u{2192} Open\u{2026}");
            }
        });
        return;
    };

    let row_height = theme::row_height(state.font_size);
    let total_rows = state.line_count();

    egui::ScrollArea::both()
        .id_salt(("viewer", state.revision))
        .auto_shrink([false; 2])
        .show_rows(ui, row_height, total_rows, |ui, row_range| {
            for row in row_range {
                let Some(range) = state.line_range(row) else {
                    continue;
                };
                let job = line_job(
                    &document.text,
                    &state.segments,
                    range,
                    &state.theme,
                    state.font_size,
                    state.dark_mode,
                );
                ui.add(egui::Label::new(job).extend());
            }
        });
}

/// Build the layout for the bytes `line` of `text`.
///
/// `segments` must be sorted and non-overlapping, as produced by
/// [`crate::core::segment::flatten`]; pieces are clipped to the line.
pub fn line_job(
    text: &str,
    segments: &[Segment],
    line: Range<usize>,
    styles: &Theme,
    font_size: f32,
    dark_mode: bool,
) -> LayoutJob {
    let mut job = LayoutJob::default();
    let first = segments.partition_point(|s| s.end <= line.start);

    for seg in segments[first..].iter().take_while(|s| s.start < line.end) {
        let start = seg.start.max(line.start);
        let end = seg.end.min(line.end);
        if start >= end {
            continue;
        }
        let format = match seg.kind {
            Some(kind) => theme::token_format(styles.style(kind), font_size),
            None => theme::plain_format(font_size, dark_mode),
        };
        job.append(&text[start..end], 0.0, format);
    }

    // An empty line still needs a row of the right height.
    if job.sections.is_empty() {
        job.append("", 0.0, theme::plain_format(font_size, dark_mode));
    }
    job
}
