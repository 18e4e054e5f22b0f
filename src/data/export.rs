use std::path::Path;

use super::error::{ReconcileError, Result};
use super::model::Table;

/// Serialize a table as comma-separated UTF-8 text.
///
/// Header first, columns in table order, no index column. Missing cells are
/// written as empty fields and fields are quoted only when they need it, so
/// an empty table produces just the header line.
pub fn to_csv_bytes(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .from_writer(Vec::new());

    writer.write_record(table.columns()).map_err(encode_error)?;
    for row in table.rows() {
        writer
            .write_record(row.iter().map(|cell| cell.to_string()))
            .map_err(encode_error)?;
    }

    writer
        .into_inner()
        .map_err(|e| ReconcileError::Io {
            path: "<memory>".to_string(),
            message: e.to_string(),
        })
}

/// Write report bytes to `path`, replacing any existing file.
pub fn write_report(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).map_err(|e| ReconcileError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn encode_error(e: csv::Error) -> ReconcileError {
    ReconcileError::Io {
        path: "<memory>".to_string(),
        message: e.to_string(),
    }
}
