//! CSV import and export of the painting table.
//!
//! Export writes the schema columns in order. Import matches columns by
//! header name: unknown columns are ignored, missing ones read as empty.

use csv::{ReaderBuilder, StringRecord, Writer};
use tracing::debug;

use super::data::{Painting, TableRow, FIELD_NAMES};
use crate::error::{GalleryError, Result};

/// Default file name offered for downloads
pub const EXPORT_FILE_NAME: &str = "paintings.csv";

/// Serialize paintings to CSV bytes (header row included)
pub fn export_csv(paintings: &[Painting]) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(FIELD_NAMES)?;

    for painting in paintings {
        let id = painting.id.to_string();
        let mut record = Vec::with_capacity(FIELD_NAMES.len());
        record.push(id.as_str());
        record.extend(painting.details.values());
        writer.write_record(&record)?;
    }

    writer.into_inner().map_err(|e| GalleryError::Io(e.into_error()))
}

/// Parse CSV bytes into table rows.
///
/// Fails with `GalleryError::Parse` for invalid UTF-8, rows with the wrong
/// number of fields, a missing header row, or an id that is not an integer.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<TableRow>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(parse_error)?
        .iter()
        .map(|h| h.trim_matches('\u{feff}').to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(GalleryError::Parse("file has no header row".to_string()));
    }

    let ignored: Vec<&str> = headers
        .iter()
        .map(String::as_str)
        .filter(|h| !FIELD_NAMES.contains(h))
        .collect();
    if !ignored.is_empty() {
        debug!(columns = ?ignored, "ignoring unknown CSV columns");
    }

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(parse_error)?;
        // +2: one for the header, one for 1-based numbering
        rows.push(row_from_record(&headers, &record, index + 2)?);
    }

    debug!(rows = rows.len(), "CSV parsed");
    Ok(rows)
}

fn row_from_record(headers: &[String], record: &StringRecord, line: usize) -> Result<TableRow> {
    let mut row = TableRow::default();

    for (name, value) in headers.iter().zip(record.iter()) {
        if name == "id" {
            row.id = parse_id(value, line)?;
        } else {
            row.details.set_field(name, value.to_string());
        }
    }

    Ok(row)
}

fn parse_id(value: &str, line: usize) -> Result<Option<i64>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    value
        .parse()
        .map(Some)
        .map_err(|_| GalleryError::Parse(format!("line {line}: id '{value}' is not an integer")))
}

fn parse_error(e: csv::Error) -> GalleryError {
    GalleryError::Parse(e.to_string())
}
