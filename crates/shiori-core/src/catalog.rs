//! # Catalog
//!
//! The ordered, deduplicated collection of normalized records. A record's
//! position in the catalog is its only identity; the vector index and the
//! similarity matrix are keyed by it, so every filtering step happens here,
//! before indexing.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::loader::{self, LoadedRows};
use crate::normalize::Normalizer;
use crate::types::{RawRecord, Record};

/// Counters collected while building a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Rows accepted from the source.
    pub rows_read: usize,
    /// Malformed rows dropped by the loader.
    pub rows_skipped: usize,
    /// Rows dropped because their normalized fields repeated an earlier row.
    pub duplicates_removed: usize,
}

/// Ordered sequence of unique records with dense positions `0..len()`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<Record>,
    stats: CatalogStats,
}

impl Catalog {
    /// Deduplicates already-normalized records, keeping first occurrences
    /// in their original order.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        let mut rows_read = 0usize;

        for record in records {
            rows_read += 1;
            // combined_features is derived from the four fields, so the
            // whole record is the dedup key
            if seen.insert(record.clone()) {
                kept.push(record);
            }
        }

        let duplicates_removed = rows_read - kept.len();
        if duplicates_removed > 0 {
            debug!(duplicates_removed, "dropped duplicate catalog rows");
        }

        Self {
            records: kept,
            stats: CatalogStats {
                rows_read,
                rows_skipped: 0,
                duplicates_removed,
            },
        }
    }

    /// Normalizes raw rows, composes their features, and deduplicates.
    pub fn from_raw<'a, I>(normalizer: &Normalizer, rows: I) -> Self
    where
        I: IntoIterator<Item = &'a RawRecord>,
    {
        Self::from_records(rows.into_iter().map(|raw| normalizer.normalize(raw)))
    }

    /// Reads CSV from any reader and builds a catalog from its valid rows.
    ///
    /// # Errors
    ///
    /// Fails if the header lacks a required column or the stream cannot be
    /// read. Malformed rows are skipped, not reported as errors.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let normalizer = Normalizer::new()?;
        let loaded = loader::read_rows(reader)?;
        Ok(Self::from_loaded(&normalizer, loaded))
    }

    /// Opens a CSV file and builds a catalog from it.
    ///
    /// # Errors
    ///
    /// See [`Catalog::from_reader`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let normalizer = Normalizer::new()?;
        let loaded = loader::read_path(path)?;
        let catalog = Self::from_loaded(&normalizer, loaded);
        info!(
            path = %path.display(),
            records = catalog.len(),
            skipped = catalog.stats.rows_skipped,
            duplicates = catalog.stats.duplicates_removed,
            "loaded catalog"
        );
        Ok(catalog)
    }

    fn from_loaded(normalizer: &Normalizer, loaded: LoadedRows) -> Self {
        let mut catalog = Self::from_raw(normalizer, &loaded.rows);
        catalog.stats.rows_skipped = loaded.skipped;
        catalog
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterates `(position, record)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Record)> {
        self.records.iter().enumerate()
    }

    /// The feature strings in catalog order, i.e. the indexing corpus.
    pub fn features(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(Record::combined_features)
    }

    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str, authors: &str, publisher: &str, language: &str) -> RawRecord {
        RawRecord::new(title, authors, publisher, language)
    }

    #[test]
    fn empty_catalog() {
        let catalog = Catalog::from_records(Vec::new());
        assert!(catalog.is_empty());
        assert_eq!(catalog.iter().count(), 0);
        assert_eq!(catalog.stats(), CatalogStats::default());
    }

    #[test]
    fn normalized_duplicates_collapse() {
        let n = Normalizer::new().unwrap();
        let rows = vec![
            raw("Dune (Dune Chronicles, #1)", "Frank Herbert", "Ace Books", "eng"),
            raw("Dune", "Frank Herbert/Someone Else", "Ace Books Inc.", "en-US"),
        ];
        let catalog = Catalog::from_raw(&n, &rows);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.stats().rows_read, 2);
        assert_eq!(catalog.stats().duplicates_removed, 1);
    }

    #[test]
    fn positions_are_dense_after_dedup() {
        let n = Normalizer::new().unwrap();
        let rows = vec![
            raw("Dune", "Frank Herbert", "Ace", "eng"),
            raw("Emma", "Jane Austen", "Penguin", "eng"),
            raw("Dune", "Frank Herbert", "Ace", "eng"),
            raw("Persuasion", "Jane Austen", "Penguin", "eng"),
            raw("Emma", "Jane Austen", "Penguin", "eng"),
        ];
        let catalog = Catalog::from_raw(&n, &rows);

        let positions: Vec<usize> = catalog.iter().map(|(i, _)| i).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        let titles: Vec<&str> = catalog.records().iter().map(Record::title).collect();
        assert_eq!(titles, vec!["dune", "emma", "persuasion"]);
        assert_eq!(catalog.stats().duplicates_removed, 2);
    }

    #[test]
    fn differing_language_is_not_a_duplicate() {
        let n = Normalizer::new().unwrap();
        let rows = vec![
            raw("Dune", "Frank Herbert", "Ace", "eng"),
            raw("Dune", "Frank Herbert", "Ace", "spa"),
        ];
        let catalog = Catalog::from_raw(&n, &rows);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn from_reader_counts_skipped_rows() {
        let csv = "title,authors,publisher,language_code\n\
                   Dune,Frank Herbert,Ace Books,eng\n\
                   broken,row\n\
                   Emma,Jane Austen,Penguin,en-GB\n";
        let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.stats().rows_skipped, 1);
        assert_eq!(catalog.get(1).unwrap().language(), "en");
    }

    #[test]
    fn features_follow_catalog_order() {
        let catalog = Catalog::from_records(vec![
            Record::new("dune", "frank herbert", "ace", "en"),
            Record::new("emma", "jane austen", "penguin", "en"),
        ]);
        let features: Vec<&str> = catalog.features().collect();
        assert_eq!(features, vec!["dune frank herbert ace en", "emma jane austen penguin en"]);
    }
}
