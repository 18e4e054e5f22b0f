use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use super::error::{ReconcileError, Result};
use super::model::{Cell, Source, Table};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load one of the two comparison inputs from a file on disk.
///
/// The extension is not inspected; the delimiter comes from `source`.
pub fn load_file(path: &Path, source: Source) -> Result<Table> {
    let file = std::fs::File::open(path).map_err(|e| ReconcileError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    load_source(file, source)
}

/// Load one of the two comparison inputs from any byte stream.
pub fn load_source<R: Read>(reader: R, source: Source) -> Result<Table> {
    let table = load_table(reader, source.delimiter())
        .map_err(|message| ReconcileError::parse(source.label(), message))?;
    log::debug!(
        "Parsed {} file: {} rows, columns {:?}",
        source,
        table.len(),
        table.columns()
    );
    Ok(table)
}

/// Parse delimited text into a [`Table`], using the first row as the header.
///
/// The whole stream is read into memory first. Fails with the parser's own
/// message on ragged rows, invalid UTF-8 or an input without a header row.
/// Blank lines are skipped and a leading UTF-8 byte order mark is ignored.
pub fn load_table<R: Read>(mut reader: R, delimiter: u8) -> std::result::Result<Table, String> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| format!("reading input: {e}"))?;
    let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(false)
        .from_reader(content);

    let header = reader.headers().map_err(|e| e.to_string())?;
    if header.is_empty() {
        return Err("No columns to parse from file".to_string());
    }
    let columns = dedup_columns(header.iter());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| e.to_string())?;
        rows.push(record.iter().map(Cell::from_field).collect());
    }

    Ok(Table::new(columns, rows))
}

// ---------------------------------------------------------------------------
// Header helpers
// ---------------------------------------------------------------------------

/// Make header names unique: repeats of `X` become `X.1`, `X.2`, ...
/// skipping any suffixed name the file already uses.
fn dedup_columns<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let names: Vec<&str> = names.collect();
    let mut taken: HashSet<String> = HashSet::new();
    let mut columns = Vec::with_capacity(names.len());

    for name in names {
        let mut candidate = name.to_string();
        let mut suffix = 1;
        while taken.contains(&candidate) {
            candidate = format!("{name}.{suffix}");
            suffix += 1;
        }
        taken.insert(candidate.clone());
        columns.push(candidate);
    }
    columns
}
