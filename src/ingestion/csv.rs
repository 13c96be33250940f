//! Delimited-text loading.

use std::path::Path;

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::{Listing, RawRow, REQUIRED_COLUMNS};

/// Read every row of a delimited file as a [`RawRow`].
///
/// Rules:
///
/// - The file must have a header row.
/// - The header must contain every column in [`REQUIRED_COLUMNS`] (order and extra columns are free).
/// - Short rows are accepted; missing cells read as empty strings.
pub fn read_raw_rows_from_path(path: impl AsRef<Path>, delimiter: u8) -> AnalysisResult<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)?;
    read_raw_rows_from_reader(&mut rdr)
}

/// Read raw rows from an existing CSV reader.
///
/// Bytes that are not valid UTF-8 are decoded as U+FFFD rather than failing the load.
pub fn read_raw_rows_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> AnalysisResult<Vec<RawRow>> {
    let names: Vec<String> = rdr
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).trim().to_owned())
        .collect();

    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|name| !names.iter().any(|h| h.as_str() == **name))
    {
        return Err(AnalysisError::SchemaMismatch {
            message: format!("missing required column '{missing}'. headers={names:?}"),
        });
    }

    let mut rows = Vec::new();
    for result in rdr.byte_records() {
        let record = result?;
        let row: RawRow = names
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let cell = record.get(idx).map(String::from_utf8_lossy).unwrap_or_default();
                (name.clone(), cell.into_owned())
            })
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

/// Parse raw rows into listings, one per row and in order. No row is dropped.
pub fn parse_listings(rows: &[RawRow]) -> Vec<Listing> {
    rows.iter().map(Listing::from_raw).collect()
}

/// Load listings from a delimited file.
pub fn ingest_listings_from_path(path: impl AsRef<Path>, delimiter: u8) -> AnalysisResult<Vec<Listing>> {
    let rows = read_raw_rows_from_path(path, delimiter)?;
    Ok(parse_listings(&rows))
}

/// Load listings from an existing CSV reader.
pub fn ingest_listings_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> AnalysisResult<Vec<Listing>> {
    let rows = read_raw_rows_from_reader(rdr)?;
    Ok(parse_listings(&rows))
}
