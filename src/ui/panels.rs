use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use inventory_compare::data::export::write_report;
use inventory_compare::data::loader::load_file;
use inventory_compare::data::{REPORT_FILE_NAME, REPORT_MIME};
use inventory_compare::Source;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – inputs and status selection
// ---------------------------------------------------------------------------

/// Render the left panel: the two input slots and the status multi-select.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Inputs");
    ui.separator();

    for source in [Source::Export, Source::Scanned] {
        input_slot(ui, state, source);
        ui.add_space(6.0);
    }

    ui.separator();
    ui.heading("Item statuses");

    if state.export.is_none() {
        ui.label("No export file loaded.");
        return;
    }
    if state.status_options.is_empty() {
        ui.label("Export has no item statuses.");
        return;
    }

    let n_selected = state.selected.len();
    let n_total = state.status_options.len();
    ui.label(format!("Include in the comparison  ({n_selected}/{n_total})"));

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });

    // Clone so the loop can mutate state.
    let options = state.status_options.clone();
    let mut toggled: Option<String> = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for status in &options {
                let mut checked = state.selected.contains(status);
                if ui.checkbox(&mut checked, status).changed() {
                    toggled = Some(status.clone());
                }
            }
        });

    if let Some(status) = toggled {
        state.toggle_status(&status);
    }
}

fn input_slot(ui: &mut Ui, state: &mut AppState, source: Source) {
    let title = match source {
        Source::Export => "Horizon export (TSV)",
        Source::Scanned => "Scanned inventory (CSV)",
    };
    ui.strong(title);

    match state.file(source) {
        Some(file) => {
            ui.label(format!("{}  ({} rows)", file.name, file.table.len()));
            for column in file.table.missing_required(source) {
                ui.label(
                    RichText::new(format!("No '{column}' column"))
                        .color(Color32::from_rgb(220, 140, 40)),
                );
            }
        }
        None => {
            ui.label(RichText::new("not loaded").italics());
        }
    }
    if let Some(err) = state.load_error(source) {
        ui.label(RichText::new(err).color(Color32::RED));
    }

    if ui.button("Open…").clicked() {
        open_file_dialog(state, source);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open export file…").clicked() {
                open_file_dialog(state, Source::Export);
                ui.close_menu();
            }
            if ui.button("Open scanned file…").clicked() {
                open_file_dialog(state, Source::Scanned);
                ui.close_menu();
            }
            ui.separator();
            let can_save = state.reconciliation().is_some();
            if ui
                .add_enabled(can_save, egui::Button::new("Save missing items report…"))
                .clicked()
            {
                save_report_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(r) = state.reconciliation() {
            ui.label(format!(
                "{} of {} selected items missing",
                r.missing_count(),
                r.filtered.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState, source: Source) {
    let file = rfd::FileDialog::new()
        .set_title(source.dialog_title())
        .add_filter("Supported files", source.extensions())
        .pick_file();

    if let Some(path) = file {
        open_path(state, &path, source);
    }
}

/// Load `path` into the given slot and report the outcome in `state`.
pub fn open_path(state: &mut AppState, path: &Path, source: Source) {
    match load_file(path, source) {
        Ok(table) => {
            log::info!(
                "Loaded {} file {} with {} rows, columns {:?}",
                source,
                path.display(),
                table.len(),
                table.columns()
            );
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            state.set_file(source, name, table);
        }
        Err(e) => {
            log::error!("Failed to load {}: {e}", path.display());
            state.set_load_error(source, e.to_string());
        }
    }
}

pub fn save_report_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save missing items report")
        .set_file_name(REPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match save_report(state, &path) {
            Ok(n) => {
                log::info!("Saved {n} missing items to {} ({REPORT_MIME})", path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to save report: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn save_report(state: &AppState, path: &Path) -> Result<usize> {
    let reconciliation = state
        .reconciliation()
        .context("no comparison result to save")?;
    let bytes = state
        .report_bytes()
        .context("no comparison result to save")?
        .context("encoding report")?;
    write_report(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(reconciliation.missing_count())
}
