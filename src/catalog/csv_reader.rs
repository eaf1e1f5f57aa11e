//! CSV decoding of exoplanet catalogs.
//!
//! Reads a UTF-8 CSV with a header row into [`RawRow`]s. Rows with fewer or
//! more cells than the header are tolerated (short rows pad with absent
//! cells, long rows drop the overflow); a structurally unreadable file is
//! the only fatal condition.

use std::io::Read;

use crate::exoscore_errors::ExoscoreError;

use super::RawRow;

/// Decode a CSV catalog into its header list and data rows.
///
/// Arguments
/// -----------------
/// * `reader`: UTF-8 CSV content with a header row.
///
/// Return
/// ----------
/// * `(headers, rows)` with headers verbatim (trimmed) and one [`RawRow`]
///   per data line, or [`ExoscoreError::EmptyCatalog`] when the file has no
///   headers or no data rows.
pub fn read_catalog<R: Read>(reader: R) -> Result<(Vec<String>, Vec<RawRow>), ExoscoreError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(ExoscoreError::EmptyCatalog);
    }

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(RawRow::from_cells(&headers, record.iter()));
    }

    if rows.is_empty() {
        return Err(ExoscoreError::EmptyCatalog);
    }

    Ok((headers, rows))
}
