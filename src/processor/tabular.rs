//! Row and column summary for delimited text

use crate::error::{DecodeError, Result};
use crate::utils::format_str_list;

/// Header and data-row count of a CSV document
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableShape {
    /// Column names from the first record
    pub columns: Vec<String>,
    /// Records after the header
    pub rows: usize,
}

/// Read the header and count data rows
///
/// Every line is a record, blank ones included, except line breaks inside quoted fields.
/// A blank first line yields an empty header. Rows may have a different field count than
/// the header. A document without any record is an I/O-class error.
pub fn shape(content: &str) -> Result<TableShape> {
    let mut records = split_records(content).into_iter();
    let header = records.next().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "CSV artifact is empty: no header row",
        )
    })?;

    Ok(TableShape {
        columns: parse_fields(header)?,
        rows: records.count(),
    })
}

#[derive(Clone, Copy)]
enum ScanState {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Split `content` into raw records at `\n`, `\r\n` or `\r` outside quoted fields
///
/// A quote only opens a quoted field at the start of a field, and `""` inside a quoted field
/// is an escaped quote. Text after the last line break forms a final record if non-empty.
fn split_records(content: &str) -> Vec<&str> {
    let bytes = content.as_bytes();
    let mut records = Vec::new();
    let mut state = ScanState::FieldStart;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        state = match (state, b) {
            (ScanState::Quoted, b'"') => ScanState::QuoteInQuoted,
            (ScanState::Quoted, _) => ScanState::Quoted,
            (ScanState::FieldStart, b'"') | (ScanState::QuoteInQuoted, b'"') => ScanState::Quoted,
            (_, b'\n' | b'\r') => {
                records.push(&content[start..i]);
                if b == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
                ScanState::FieldStart
            }
            (_, b',') => ScanState::FieldStart,
            _ => ScanState::Unquoted,
        };
        i += 1;
    }

    if start < bytes.len() {
        records.push(&content[start..]);
    }
    records
}

/// Field values of a single raw record
fn parse_fields(record: &str) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(record.as_bytes());

    match reader.records().next() {
        Some(fields) => Ok(fields
            .map_err(DecodeError::Csv)?
            .iter()
            .map(str::to_string)
            .collect()),
        None => Ok(Vec::new()),
    }
}

/// `Number of rows` and `Columns` lines
pub fn summarize(content: &str) -> Result<String> {
    let shape = shape(content)?;
    Ok(format!(
        "Number of rows: {}\nColumns: {}\n",
        shape.rows,
        format_str_list(&shape.columns)
    ))
}
