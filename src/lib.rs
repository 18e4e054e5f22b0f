//! Library inventory comparison.
//!
//! Loads a library-system export and a scanned inventory, keeps the export
//! rows with the chosen item statuses and reports those whose barcode was
//! never scanned.

pub mod data;

pub use data::error::ReconcileError;
pub use data::filter::StatusSelection;
pub use data::model::{Cell, Source, Table};
pub use data::{run, Report};
