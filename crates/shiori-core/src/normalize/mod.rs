//! # Metadata Normalization
//!
//! Cleans raw title, author, publisher, and language fields into the
//! canonical lowercase forms the index and the resolver work on.

pub mod fields;
pub mod language;
pub mod stopwords;

pub use fields::Normalizer;
pub use language::{UNKNOWN_LANGUAGE, canonical_language};
pub use stopwords::{INDEX_STOP_WORDS, StopWords, TITLE_STOP_WORDS};
