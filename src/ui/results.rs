use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use inventory_compare::Table;

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Comparison result (central panel)
// ---------------------------------------------------------------------------

/// Render the summary line and the missing-items table.
pub fn results_panel(ui: &mut Ui, state: &AppState) {
    let outcome = match &state.outcome {
        Some(outcome) => outcome,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(
                    "Open a Horizon export and a scanned inventory file  (File → Open…)\n\
                     Both files need a header row with a Barcode column.",
                );
            });
            return;
        }
    };

    match outcome {
        Ok(reconciliation) => {
            ui.label(
                RichText::new(reconciliation.summary())
                    .color(Color32::from_rgb(60, 160, 80))
                    .strong(),
            );
            ui.separator();
            missing_items_table(ui, &reconciliation.missing);
        }
        Err(e) => {
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
        }
    }
}

fn missing_items_table(ui: &mut Ui, table: &Table) {
    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        let mut builder = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center));
        for _ in table.columns() {
            builder = builder.column(Column::auto().at_least(60.0).clip(true));
        }

        builder
            .header(ROW_HEIGHT + 4.0, |mut header| {
                for name in table.columns() {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, table.len(), |mut row| {
                    let cells = &table.rows()[row.index()];
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell.to_string());
                        });
                    }
                });
            });
    });
}
