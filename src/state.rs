use inventory_compare::data::export::to_csv_bytes;
use inventory_compare::data::filter::{default_selection, status_options, StatusSelection};
use inventory_compare::data::reconcile::{reconcile, Reconciliation};
use inventory_compare::{ReconcileError, Source, Table};

// ---------------------------------------------------------------------------
// Loaded input
// ---------------------------------------------------------------------------

/// One successfully parsed input file.
pub struct LoadedFile {
    /// File name shown in the side panel.
    pub name: String,
    pub table: Table,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Parsed export file (None until loaded).
    pub export: Option<LoadedFile>,

    /// Parsed scanned-inventory file (None until loaded).
    pub scanned: Option<LoadedFile>,

    /// Last parse/read failure per input, shown next to its slot.
    pub export_error: Option<String>,
    pub scanned_error: Option<String>,

    /// Statuses on offer, from the export's status column.
    pub status_options: Vec<String>,

    /// Statuses currently ticked.
    pub selected: StatusSelection,

    /// Result of the last comparison (None until both files are loaded).
    pub outcome: Option<Result<Reconciliation, ReconcileError>>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn file(&self, source: Source) -> Option<&LoadedFile> {
        match source {
            Source::Export => self.export.as_ref(),
            Source::Scanned => self.scanned.as_ref(),
        }
    }

    pub fn load_error(&self, source: Source) -> Option<&str> {
        match source {
            Source::Export => self.export_error.as_deref(),
            Source::Scanned => self.scanned_error.as_deref(),
        }
    }

    /// Ingest a newly parsed input and rerun the comparison.
    ///
    /// A new export resets the status choices to the defaults.
    pub fn set_file(&mut self, source: Source, name: String, table: Table) {
        match source {
            Source::Export => {
                self.status_options = status_options(&table).unwrap_or_default();
                self.selected = default_selection(&self.status_options);
                self.export = Some(LoadedFile { name, table });
                self.export_error = None;
            }
            Source::Scanned => {
                self.scanned = Some(LoadedFile { name, table });
                self.scanned_error = None;
            }
        }
        self.status_message = None;
        self.recompute();
    }

    /// Record a failed load. The slot is cleared so no stale comparison is shown.
    pub fn set_load_error(&mut self, source: Source, message: String) {
        match source {
            Source::Export => {
                self.export = None;
                self.export_error = Some(message);
                self.status_options.clear();
                self.selected.clear();
            }
            Source::Scanned => {
                self.scanned = None;
                self.scanned_error = Some(message);
            }
        }
        self.recompute();
    }

    /// Rerun the comparison if both inputs are present.
    pub fn recompute(&mut self) {
        self.outcome = match (&self.export, &self.scanned) {
            (Some(export), Some(scanned)) => {
                let result = reconcile(&export.table, &scanned.table, &self.selected);
                match &result {
                    Ok(r) => log::debug!("{}", r.summary()),
                    Err(e) => log::warn!("Comparison aborted: {e}"),
                }
                Some(result)
            }
            _ => None,
        };
    }

    /// The successful comparison, if any.
    pub fn reconciliation(&self) -> Option<&Reconciliation> {
        self.outcome.as_ref().and_then(|o| o.as_ref().ok())
    }

    /// CSV bytes of the missing-items table, ready to save.
    pub fn report_bytes(&self) -> Option<Result<Vec<u8>, ReconcileError>> {
        self.reconciliation().map(|r| to_csv_bytes(&r.missing))
    }

    /// Toggle a single status in the selection.
    pub fn toggle_status(&mut self, status: &str) {
        if !self.selected.remove(status) {
            self.selected.insert(status.to_string());
        }
        self.recompute();
    }

    /// Select every status on offer.
    pub fn select_all(&mut self) {
        self.selected = self.status_options.iter().cloned().collect();
        self.recompute();
    }

    /// Deselect every status.
    pub fn select_none(&mut self) {
        self.selected.clear();
        self.recompute();
    }
}
