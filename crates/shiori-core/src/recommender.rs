//! # Recommender
//!
//! The immutable context built once at startup: the catalog, its vector
//! index, and the similarity matrix, plus the configuration they were built
//! with. Queries are pure functions of this context and the query string.

use std::path::Path;

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::{Result, ShioriError};
use crate::index::{IdfMode, SimilarityMatrix, Tokenizer, VectorIndex};
use crate::resolver;
use crate::types::{Outcome, Recommendation, SearchBy};

/// Number of recommendations returned per query by default.
pub const DEFAULT_TOP_K: usize = 10;

/// Shortest token length kept by the index tokenizer by default.
pub const DEFAULT_MIN_TOKEN_LEN: usize = 2;

/// Configuration for building a [`Recommender`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommenderConfig {
    /// Maximum number of recommendations per query
    pub top_k: usize,
    /// IDF variant used for term weighting
    pub idf_mode: IdfMode,
    /// Shortest token the index tokenizer keeps
    pub min_token_len: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            idf_mode: IdfMode::Smooth,
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
        }
    }
}

impl RecommenderConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of recommendations per query.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the IDF variant.
    pub fn with_idf_mode(mut self, idf_mode: IdfMode) -> Self {
        self.idf_mode = idf_mode;
        self
    }

    /// Set the minimum token length for the index tokenizer.
    pub fn with_min_token_len(mut self, min_token_len: usize) -> Self {
        self.min_token_len = min_token_len;
        self
    }

    /// Checks the configuration before any index is built.
    ///
    /// # Errors
    ///
    /// Returns `ShioriError::InvalidConfig` if `top_k` or `min_token_len`
    /// is zero.
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(ShioriError::InvalidConfig("top_k must be at least 1".into()));
        }
        if self.min_token_len == 0 {
            return Err(ShioriError::InvalidConfig(
                "min_token_len must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Built recommendation context, read-only after construction.
#[derive(Debug, Clone)]
pub struct Recommender {
    config: RecommenderConfig,
    catalog: Catalog,
    index: VectorIndex,
    similarity: SimilarityMatrix,
}

impl Recommender {
    /// Indexes `catalog` and computes its similarity matrix.
    ///
    /// # Errors
    ///
    /// Returns `ShioriError::InvalidConfig` for an invalid configuration.
    pub fn build(catalog: Catalog, config: RecommenderConfig) -> Result<Self> {
        config.validate()?;

        let tokenizer = Tokenizer::new(config.min_token_len)?;
        let features: Vec<&str> = catalog.features().collect();
        let index = VectorIndex::build(&features, &tokenizer, config.idf_mode);
        let similarity = SimilarityMatrix::build(&index);

        for got in [index.len(), similarity.len()] {
            if got != catalog.len() {
                return Err(ShioriError::IndexMismatch {
                    expected: catalog.len(),
                    got,
                });
            }
        }

        info!(
            records = catalog.len(),
            vocabulary = index.vocabulary_size(),
            idf = ?config.idf_mode,
            "built recommender"
        );

        Ok(Self {
            config,
            catalog,
            index,
            similarity,
        })
    }

    /// Loads a CSV catalog from `path` and builds a recommender over it.
    ///
    /// # Errors
    ///
    /// Propagates load failures (missing file, missing column) and
    /// configuration errors.
    pub fn from_path<P: AsRef<Path>>(path: P, config: RecommenderConfig) -> Result<Self> {
        let catalog = Catalog::from_path(path)?;
        Self::build(catalog, config)
    }

    /// Resolves a query to up to `top_k` similar books.
    ///
    /// # Errors
    ///
    /// Returns `ShioriError::EmptyQuery` if the query is empty or
    /// whitespace-only; no lookup is attempted in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiori_core::{Catalog, Recommender, RecommenderConfig, Record};
    ///
    /// let catalog = Catalog::from_records(vec![
    ///     Record::new("dune", "frank herbert", "ace books", "en"),
    ///     Record::new("dune messiah", "frank herbert", "ace books", "en"),
    ///     Record::new("emma", "jane austen", "penguin", "en"),
    /// ]);
    /// let recommender = Recommender::build(catalog, RecommenderConfig::default()).unwrap();
    ///
    /// let outcome = recommender.recommend("Messiah").unwrap();
    /// let first = &outcome.recommendations()[0];
    /// assert_eq!(first.book.title(), "dune");
    /// ```
    pub fn recommend(&self, query: &str) -> Result<Outcome> {
        recommend(self, query)
    }

    /// Like [`Recommender::recommend`], with the caller's declared search
    /// category. The category is logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// See [`Recommender::recommend`].
    pub fn recommend_by(&self, query: &str, by: SearchBy) -> Result<Outcome> {
        debug!(%by, "search category is advisory");
        recommend(self, query)
    }

    #[must_use]
    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    #[must_use]
    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }
}

/// Resolves `query` against a built recommender.
///
/// # Errors
///
/// Returns `ShioriError::EmptyQuery` if the query is empty or
/// whitespace-only.
pub fn recommend(ctx: &Recommender, query: &str) -> Result<Outcome> {
    if query.trim().is_empty() {
        return Err(ShioriError::EmptyQuery);
    }

    let Some((matched, phase)) = resolver::locate(&ctx.catalog, query) else {
        debug!(query, "no record matched");
        return Ok(Outcome::not_found());
    };
    debug!(query, matched, %phase, "query matched");

    let row = ctx.similarity.row(matched).ok_or(ShioriError::IndexMismatch {
        expected: ctx.catalog.len(),
        got: ctx.similarity.len(),
    })?;

    let recommendations = resolver::rank_neighbors(row, matched, ctx.config.top_k)
        .into_iter()
        .enumerate()
        .filter_map(|(rank, (index, score))| {
            ctx.catalog.get(index).map(|book| Recommendation {
                rank: rank + 1,
                index,
                score,
                book: book.clone(),
            })
        })
        .collect();

    Ok(Outcome::Found {
        matched,
        phase,
        recommendations,
    })
}
