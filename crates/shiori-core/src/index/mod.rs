//! # Vector Index
//!
//! TF-IDF document vectors over the composed feature strings and the dense
//! cosine similarity matrix derived from them. Both are built once and are
//! read-only afterwards.

pub mod similarity;
pub mod tfidf;
pub mod tokenizer;

pub use similarity::SimilarityMatrix;
pub use tfidf::{IdfMode, SparseVector, VectorIndex};
pub use tokenizer::{Token, Tokenizer};
