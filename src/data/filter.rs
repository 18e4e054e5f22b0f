use std::collections::BTreeSet;

use super::error::Result;
use super::model::Table;
use super::{DEFAULT_STATUSES, STATUS_COLUMN};

// ---------------------------------------------------------------------------
// Status selection
// ---------------------------------------------------------------------------

/// The statuses the user has ticked. An empty set selects nothing.
pub type StatusSelection = BTreeSet<String>;

/// Distinct non-missing values of the status column, sorted ascending.
pub fn status_options(export: &Table) -> Result<Vec<String>> {
    Ok(export.distinct_values(STATUS_COLUMN)?.into_iter().collect())
}

/// The preselected statuses: [`DEFAULT_STATUSES`] restricted to those on offer.
pub fn default_selection(options: &[String]) -> StatusSelection {
    DEFAULT_STATUSES
        .iter()
        .filter(|status| options.iter().any(|o| o == *status))
        .map(|status| status.to_string())
        .collect()
}

/// Rows whose status is one of `selected`, in input order.
///
/// A row with a missing status never passes, whatever is selected.
pub fn filter_by_status(export: &Table, selected: &StatusSelection) -> Result<Table> {
    let idx = export.require_column(STATUS_COLUMN)?;
    let filtered = export.retain_rows(|row| {
        row[idx]
            .as_str()
            .is_some_and(|status| selected.contains(status))
    });
    log::debug!(
        "Status filter {:?}: {} of {} rows kept",
        selected,
        filtered.len(),
        export.len()
    );
    Ok(filtered)
}
