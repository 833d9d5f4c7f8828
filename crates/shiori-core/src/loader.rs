//! Best-effort CSV loading for raw catalog rows.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use crate::error::{Result, ShioriError};
use crate::types::RawRecord;

/// Header names accepted for the language column, in lookup order.
const LANGUAGE_COLUMNS: &[&str] = &["language", "language_code"];

/// Rows accepted from a source plus the number of rows dropped.
#[derive(Debug, Clone, Default)]
pub struct LoadedRows {
    pub rows: Vec<RawRecord>,
    pub skipped: usize,
}

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    title: usize,
    authors: usize,
    publisher: usize,
    language: usize,
    width: usize,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| headers.iter().position(|h| h.trim() == *name))
                .ok_or_else(|| ShioriError::MissingColumn {
                    column: names[0].to_string(),
                })
        };

        Ok(Self {
            title: find(&["title"])?,
            authors: find(&["authors"])?,
            publisher: find(&["publisher"])?,
            language: find(LANGUAGE_COLUMNS)?,
            width: headers.len(),
        })
    }

    fn extract(&self, record: &StringRecord) -> Option<RawRecord> {
        // rows with a stray delimiter shift every column after it
        if record.len() != self.width {
            return None;
        }
        Some(RawRecord::new(
            record.get(self.title)?,
            record.get(self.authors)?,
            record.get(self.publisher)?,
            record.get(self.language)?,
        ))
    }
}

/// Reads raw rows from CSV, skipping rows that cannot be decoded or whose
/// field count differs from the header.
///
/// # Errors
///
/// Returns `ShioriError::MissingColumn` if `title`, `authors`, `publisher`,
/// or a language column is absent, and `ShioriError::Csv` if the underlying
/// stream fails.
pub fn read_rows<R: Read>(reader: R) -> Result<LoadedRows> {
    let mut csv = ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = ColumnMap::from_headers(csv.headers()?)?;

    let mut loaded = LoadedRows::default();
    for (line, result) in csv.records().enumerate() {
        match result {
            Ok(record) => match columns.extract(&record) {
                Some(row) => loaded.rows.push(row),
                None => {
                    debug!(row = line + 1, fields = record.len(), "skipping malformed row");
                    loaded.skipped += 1;
                }
            },
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                debug!(row = line + 1, error = %e, "skipping undecodable row");
                loaded.skipped += 1;
            }
        }
    }

    if loaded.skipped > 0 {
        warn!(skipped = loaded.skipped, "skipped malformed catalog rows");
    }
    Ok(loaded)
}

/// Opens `path` and reads it with [`read_rows`].
///
/// # Errors
///
/// Returns `ShioriError::Io` if the file cannot be opened.
pub fn read_path(path: &Path) -> Result<LoadedRows> {
    let file = File::open(path)?;
    read_rows(file)
}
