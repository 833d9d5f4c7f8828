//! # Shiori Core
//!
//! Content-based book recommendations. Catalog metadata is normalized into
//! one text signal per book, weighted with TF-IDF, and compared by cosine
//! similarity; a query resolves to one book by title, author, or publisher
//! and returns its nearest neighbors.
//!
//! ## Quick Start
//!
//! ```rust
//! use shiori_core::{Catalog, Outcome, Recommender, RecommenderConfig, SearchPhase};
//!
//! let csv = "title,authors,publisher,language_code\n\
//!            Dune (Dune Chronicles #1),Frank Herbert,Ace Books,eng\n\
//!            Dune Messiah (Dune Chronicles #2),Frank Herbert,Ace Books,eng\n\
//!            Emma,Jane Austen,Penguin Classics,en-GB\n";
//!
//! let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
//! let recommender = Recommender::build(catalog, RecommenderConfig::default()).unwrap();
//!
//! let outcome = recommender.recommend("herbert").unwrap();
//! assert!(matches!(outcome, Outcome::Found { matched: 0, phase: SearchPhase::Authors, .. }));
//! assert_eq!(outcome.recommendations()[0].book.title(), "dune messiah");
//! ```
pub mod catalog;
pub mod error;
pub mod index;
pub mod loader;
pub mod normalize;
pub mod recommender;
pub mod resolver;
pub mod types;

// Re-export primary API
pub use catalog::{Catalog, CatalogStats};
pub use error::{Result, ShioriError};
pub use index::{IdfMode, SimilarityMatrix, SparseVector, Tokenizer, VectorIndex};
pub use normalize::Normalizer;
pub use recommender::{Recommender, RecommenderConfig, recommend};
pub use types::{
    NOT_FOUND_MESSAGE, Outcome, RawRecord, Recommendation, Record, SearchBy, SearchPhase,
};
