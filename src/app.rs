use std::path::PathBuf;

use eframe::egui;

use inventory_compare::Source;

use crate::state::AppState;
use crate::ui::{panels, results};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InventoryCompareApp {
    pub state: AppState,
}

impl InventoryCompareApp {
    /// Load files dropped onto the window.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });

        for path in dropped {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_ascii_lowercase();
            let export_loaded = self.state.export.is_some();
            match drop_target(&ext, export_loaded) {
                Some(source) => panels::open_path(&mut self.state, &path, source),
                None => {
                    log::warn!("Ignoring dropped file {}", path.display());
                    self.state.status_message =
                        Some(format!("Unsupported file type: .{ext}"));
                }
            }
        }
    }
}

/// Which input slot a dropped file goes to, by extension.
///
/// `.txt` is valid for both; it fills the export slot first.
fn drop_target(ext: &str, export_loaded: bool) -> Option<Source> {
    match ext {
        "tsv" => Some(Source::Export),
        "csv" => Some(Source::Scanned),
        "txt" if export_loaded => Some(Source::Scanned),
        "txt" => Some(Source::Export),
        _ => None,
    }
}

impl eframe::App for InventoryCompareApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: inputs and statuses ----
        egui::SidePanel::left("input_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: missing items ----
        egui::CentralPanel::default().show(ctx, |ui| {
            results::results_panel(ui, &self.state);
        });
    }
}
