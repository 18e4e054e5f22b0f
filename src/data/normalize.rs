use super::error::Result;
use super::model::{Cell, Table};
use super::MISSING_MARKER;

/// Return a copy of `table` where every cell of `column` is text.
///
/// Missing cells become [`MISSING_MARKER`]. Both inputs go through this same
/// function, so a missing barcode on one side compares equal to a missing
/// barcode on the other.
pub fn normalize_key(table: &Table, column: &str) -> Result<Table> {
    let idx = table.require_column(column)?;
    let mut filled = 0usize;
    let normalized = table.map_column(idx, |cell| match cell {
        Cell::Text(s) => Cell::Text(s.clone()),
        Cell::Missing => {
            filled += 1;
            Cell::Text(MISSING_MARKER.to_string())
        }
    });
    if filled > 0 {
        log::debug!("Column '{column}': {filled} missing values set to '{MISSING_MARKER}'");
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn missing_keys_become_marker() {
        let table = Table::new(
            vec!["Title".into(), "Barcode".into()],
            vec![
                vec![Cell::Missing, text("007")],
                vec![text("Emma"), Cell::Missing],
            ],
        );
        let out = normalize_key(&table, "Barcode").unwrap();
        assert_eq!(out.rows()[0], vec![Cell::Missing, text("007")]);
        assert_eq!(out.rows()[1], vec![text("Emma"), text("nan")]);
        assert!(out.column(1).all(|c| !c.is_missing()));
    }

    #[test]
    fn already_text_is_unchanged() {
        let table = Table::new(vec!["Barcode".into()], vec![vec![text("0042")]]);
        assert_eq!(normalize_key(&table, "Barcode").unwrap(), table);
    }

    #[test]
    fn absent_column_is_schema_error() {
        let table = Table::empty(vec!["Item".into()]);
        let err = normalize_key(&table, "Barcode").unwrap_err();
        assert_eq!(err.missing_column(), Some("Barcode"));
    }
}
