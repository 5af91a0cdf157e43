// LogTint - ui/panels/summary.rs
//
// Classification summary window: span count per token kind, each label
// painted in its own style, plus the covered time range.

use crate::app::state::ViewerState;
use crate::core::model::TokenKind;
use crate::ui::theme;

/// Render the summary window (if state.show_summary is true).
pub fn render(ctx: &egui::Context, state: &mut ViewerState) {
    if !state.show_summary {
        return;
    }

    let mut open = true;
    egui::Window::new("Summary")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(theme::SUMMARY_WINDOW_WIDTH)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let (Some(summary), Some(title)) = (state.summary.as_ref(), state.title()) else {
                ui.label("No file loaded.");
                return;
            };

            ui.strong(title);
            ui.add_space(4.0);
            egui::Grid::new("summary_counts")
                .num_columns(2)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    for kind in TokenKind::all() {
                        let style = state.theme.style(*kind);
                        let mut label = egui::RichText::new(kind.label())
                            .monospace()
                            .color(theme::to_color32(style.colour));
                        if style.italic {
                            label = label.italics();
                        }
                        if style.bold {
                            label = label.strong();
                        }
                        ui.label(label);
                        ui.label(summary.count(*kind).to_string());
                        ui.end_row();
                    }

                    ui.label("Timestamps:");
                    ui.label(summary.timestamps.to_string());
                    ui.end_row();

                    if let (Some(first), Some(last)) =
                        (summary.first_timestamp, summary.last_timestamp)
                    {
                        ui.label("First:");
                        ui.label(first.to_string());
                        ui.end_row();

                        ui.label("Last:");
                        ui.label(last.to_string());
                        ui.end_row();
                    }
                });
        });

    if !open {
        state.show_summary = false;
    }
}
