use std::collections::HashSet;

use super::error::Result;
use super::filter::{filter_by_status, StatusSelection};
use super::model::Table;
use super::normalize::normalize_key;
use super::BARCODE_COLUMN;

// ---------------------------------------------------------------------------
// Reconciliation result
// ---------------------------------------------------------------------------

/// Outcome of comparing an export against a scan for one status selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Export rows whose status was selected.
    pub filtered: Table,
    /// Filtered rows whose barcode was never scanned.
    pub missing: Table,
    /// Distinct barcodes seen in the scan.
    pub scanned_barcodes: usize,
}

impl Reconciliation {
    pub fn missing_count(&self) -> usize {
        self.missing.len()
    }

    /// One-line summary shown above the result table.
    pub fn summary(&self) -> String {
        format!(
            "Comparison complete. {} items not found in scanned inventory.",
            self.missing_count()
        )
    }
}

// ---------------------------------------------------------------------------
// Set difference
// ---------------------------------------------------------------------------

/// Rows of `filtered` whose barcode does not appear anywhere in `scanned`.
///
/// Both tables must already be normalized on the barcode column. The scan is
/// used only as a membership set; each filtered row is judged on its own, so
/// duplicate export barcodes are all kept or all dropped together.
pub fn missing_items(filtered: &Table, scanned: &Table) -> Result<Table> {
    let export_idx = filtered.require_column(BARCODE_COLUMN)?;
    let scan_idx = scanned.require_column(BARCODE_COLUMN)?;

    let seen: HashSet<String> = scanned_set(scanned, scan_idx);
    Ok(filtered.retain_rows(|row| !seen.contains(&row[export_idx].to_string())))
}

fn scanned_set(scanned: &Table, idx: usize) -> HashSet<String> {
    scanned.column(idx).map(|c| c.to_string()).collect()
}

/// Normalize both tables, filter the export by status, then diff against the scan.
///
/// Required columns are checked in the order the comparison touches them:
/// export barcode, scanned barcode, export status. The first one absent is
/// reported and nothing else runs.
pub fn reconcile(
    export: &Table,
    scanned: &Table,
    selected: &StatusSelection,
) -> Result<Reconciliation> {
    let export = normalize_key(export, BARCODE_COLUMN)?;
    let scanned = normalize_key(scanned, BARCODE_COLUMN)?;

    let filtered = filter_by_status(&export, selected)?;
    let missing = missing_items(&filtered, &scanned)?;
    let scanned_barcodes = scanned_set(&scanned, scanned.require_column(BARCODE_COLUMN)?).len();

    log::debug!(
        "{} of {} filtered rows missing from {} scanned barcodes",
        missing.len(),
        filtered.len(),
        scanned_barcodes
    );

    Ok(Reconciliation {
        filtered,
        missing,
        scanned_barcodes,
    })
}
