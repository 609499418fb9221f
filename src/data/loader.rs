use std::io::Read;
use std::path::Path;

use super::model::{DataError, RawTable, Schema, Table};
use super::normalize::normalize;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load, validate and normalize a dataset from a file.  Dispatch by extension.
///
/// Only `.csv` (or extension-less files, treated as CSV) is supported.
pub fn load_file(path: &Path) -> Result<Table, DataError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" | "" => {
            let file = std::fs::File::open(path).map_err(|source| DataError::Io {
                path: path.display().to_string(),
                source,
            })?;
            load_reader(file)
        }
        other => Err(DataError::UnsupportedExtension(other.to_string())),
    }
}

/// Same as [`load_file`] for any byte source (an upload buffer, stdin, a test string).
pub fn load_reader<R: Read>(reader: R) -> Result<Table, DataError> {
    let raw = read_csv(reader)?;
    if raw.headers.iter().all(|h| h.is_empty()) {
        return Err(DataError::EmptyTable);
    }
    let schema = Schema::detect(&raw.headers)?;
    let records = normalize(&raw, &schema);
    let table = Table::new(schema, records)?;
    log::info!(
        "Loaded {} rows ({} main + reference), capabilities {:?}",
        table.row_count(),
        table.main_rows().len(),
        table.schema.capabilities
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one title per following row.
/// Short rows are padded with empty cells so every row matches the header.
pub fn read_csv<R: Read>(reader: R) -> Result<RawTable, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row: Vec<String> = record.iter().map(|v| v.to_string()).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    Ok(RawTable { headers, rows })
}
