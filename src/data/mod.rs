/// Data layer: table model, loading, normalization, filtering and export.
///
/// Architecture:
/// ```text
///   export .txt/.tsv (tab)     scanned .csv/.txt (comma)
///            │                          │
///            ▼                          ▼
///      ┌──────────┐               ┌──────────┐
///      │  loader  │               │  loader  │   bytes → Table
///      └──────────┘               └──────────┘
///            │                          │
///            ▼                          ▼
///      ┌───────────┐              ┌───────────┐
///      │ normalize │              │ normalize │  Barcode → text, missing → "nan"
///      └───────────┘              └───────────┘
///            │                          │
///            ▼                          │
///      ┌──────────┐                     │
///      │  filter  │  Item Status ∈ sel. │
///      └──────────┘                     │
///            │                          │
///            ▼                          ▼
///      ┌──────────────────────────────────┐
///      │ reconcile   filtered ∖ scanned   │
///      └──────────────────────────────────┘
///            │
///            ▼
///      ┌──────────┐
///      │  export  │  Table → CSV bytes
///      └──────────┘
/// ```

pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod reconcile;

use self::error::Result;
use self::filter::StatusSelection;
use self::model::Source;
use self::reconcile::Reconciliation;

/// Join key shared by both inputs.
pub const BARCODE_COLUMN: &str = "Barcode";

/// Export column the status filter applies to.
pub const STATUS_COLUMN: &str = "Item Status";

/// Statuses ticked when an export is first loaded, if the export has them.
pub const DEFAULT_STATUSES: &[&str] = &["Checked In", "Lost"];

/// Text that stands in for an empty barcode on both sides of the comparison.
pub const MISSING_MARKER: &str = "nan";

pub const REPORT_FILE_NAME: &str = "missing_items_text_input.csv";
pub const REPORT_MIME: &str = "text/csv";

/// A finished comparison: the tables behind it plus the downloadable CSV.
#[derive(Debug, Clone)]
pub struct Report {
    pub reconciliation: Reconciliation,
    pub csv: Vec<u8>,
}

/// Run the whole comparison on raw file contents.
///
/// Pure and re-entrant: the same bytes and selection always give the same
/// report, byte for byte.
pub fn run(export: &[u8], scanned: &[u8], selected: &StatusSelection) -> Result<Report> {
    let export = loader::load_source(export, Source::Export)?;
    let scanned = loader::load_source(scanned, Source::Scanned)?;
    let reconciliation = reconcile::reconcile(&export, &scanned, selected)?;
    let csv = export::to_csv_bytes(&reconciliation.missing)?;
    Ok(Report {
        reconciliation,
        csv,
    })
}
