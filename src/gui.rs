// LogTint - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the viewer panels and manages the load lifecycle.

use crate::app::load::{LoadManager, LoadProgress};
use crate::app::state::ViewerState;
use crate::core::render;
use crate::core::{export, model::ClassifiedDocument};
use crate::ui;
use crate::util::constants;
use std::path::Path;

/// Formats offered by the Export menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Html,
    Json,
    Csv,
}

impl ExportFormat {
    const ALL: [ExportFormat; 3] = [ExportFormat::Html, ExportFormat::Json, ExportFormat::Csv];

    fn menu_label(self) -> &'static str {
        match self {
            ExportFormat::Html => "Export HTML\u{2026}",
            ExportFormat::Json => "Export JSON\u{2026}",
            ExportFormat::Csv => "Export CSV\u{2026}",
        }
    }

    /// File dialog filter name and extension.
    fn filter(self) -> (&'static str, &'static str) {
        match self {
            ExportFormat::Html => ("HTML", "html"),
            ExportFormat::Json => ("JSON", "json"),
            ExportFormat::Csv => ("CSV", "csv"),
        }
    }
}

/// The LogTint viewer application.
pub struct LogTintApp {
    pub state: ViewerState,
    pub load_manager: LoadManager,
}

impl LogTintApp {
    /// Create a new application instance with the given state.
    pub fn new(state: ViewerState) -> Self {
        Self {
            state,
            load_manager: LoadManager::new(),
        }
    }

    /// Write the open document to a file chosen by the user.
    fn export_document(&mut self, format: ExportFormat) {
        let Some(ref document) = self.state.document else {
            return;
        };
        let (filter, ext) = format.filter();
        let Some(dest) = rfd::FileDialog::new()
            .add_filter(filter, &[ext])
            .set_file_name(format!("export.{ext}"))
            .save_file()
        else {
            return;
        };

        let status = write_export(std::slice::from_ref(document), format, &self.state, &dest)
            .unwrap_or_else(|e| e);
        self.state.status_message = status;
    }
}

/// Write one export, returning the status line to show.
fn write_export(
    documents: &[ClassifiedDocument],
    format: ExportFormat,
    state: &ViewerState,
    dest: &Path,
) -> Result<String, String> {
    let file = std::fs::File::create(dest).map_err(|e| format!("Cannot create file: {e}"))?;
    let mut writer = std::io::BufWriter::new(file);
    match format {
        ExportFormat::Csv => export::export_csv(documents, writer, dest)
            .map(|n| format!("Exported {n} spans to CSV."))
            .map_err(|e| format!("CSV export failed: {e}")),
        ExportFormat::Json => export::export_json(documents, writer, dest)
            .map(|n| format!("Exported {n} spans to JSON."))
            .map_err(|e| format!("JSON export failed: {e}")),
        ExportFormat::Html => {
            let title = state.title().unwrap_or(constants::DEFAULT_HTML_TITLE);
            render::render_html(documents, &state.theme, title, &mut writer)
                .and_then(|()| std::io::Write::flush(&mut writer))
                .map(|()| format!("Exported HTML to {}.", dest.display()))
                .map_err(|e| format!("HTML export failed: {e}"))
        }
    }
}

impl eframe::App for LogTintApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll for load progress
        for msg in self.load_manager.poll_progress() {
            match msg {
                LoadProgress::Started { path } => {
                    self.state.begin_load(&path);
                }
                LoadProgress::Loaded {
                    document,
                    segments,
                    duration,
                } => {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
                        "{} - {}",
                        document.source,
                        constants::APP_NAME
                    )));
                    self.state.set_document(document, segments, duration);
                }
                LoadProgress::Failed { error } => {
                    self.state.load_failed(&error);
                }
            }
        }
        // Repaint while loading so the result appears promptly.
        if self.load_manager.is_active() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }

        // pending_open: set by the CLI argument or the File menu.
        if let Some(path) = self.state.pending_open.take() {
            self.state.begin_load(&path);
            self.load_manager.start_load(path, self.state.limits);
        }

        ctx.set_visuals(if self.state.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open\u{2026}").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Log files", &["log", "txt"])
                            .add_filter("All files", &["*"])
                            .pick_file()
                        {
                            self.state.pending_open = Some(path);
                        }
                        ui.close_menu();
                    }
                    let has_document = self.state.document.is_some();
                    ui.add_enabled_ui(has_document && !self.state.loading, |ui| {
                        if ui.button("Reload").clicked() {
                            self.state.pending_open =
                                self.state.title().map(std::path::PathBuf::from);
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    // Export sub-menu -- enabled only when a document is open
                    ui.add_enabled_ui(has_document, |ui| {
                        ui.menu_button("Export", |ui| {
                            for format in ExportFormat::ALL {
                                if ui.button(format.menu_label()).clicked() {
                                    self.export_document(format);
                                    ui.close_menu();
                                }
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.button("Summary").clicked() {
                        self.state.show_summary = true;
                        ui.close_menu();
                    }
                    ui.separator();
                    ui.checkbox(&mut self.state.dark_mode, "Dark mode");
                    ui.horizontal(|ui| {
                        ui.label("Font size:");
                        if ui.small_button("\u{2212}").clicked() {
                            self.state.set_font_size(self.state.font_size - 1.0);
                        }
                        ui.label(format!("{:.0}", self.state.font_size));
                        if ui.small_button("+").clicked() {
                            self.state.set_font_size(self.state.font_size + 1.0);
                        }
                    });
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if self.state.loading {
                        ui.spinner();
                    }
                    ui.label(&self.state.status_message);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if self.state.document.is_some() {
                            ui.label(format!("{} lines", self.state.line_count()));
                        }
                    });
                });
            });

        // Central panel (highlighted text)
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::viewer::render(ui, &self.state);
        });

        ui::panels::summary::render(ctx, &mut self.state);
    }
}
