use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::index::tokenizer::Tokenizer;

/// Sparse vector as `(term id, weight)` pairs sorted by term id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(u32, f32)>,
}

impl SparseVector {
    /// Builds a vector from pairs that are already sorted by term id.
    #[must_use]
    pub fn from_sorted(entries: Vec<(u32, f32)>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[(u32, f32)] {
        &self.entries
    }

    /// Number of non-zero entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Dot product via a merge over both sorted entry lists.
    #[must_use]
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0f32;
        while i < self.entries.len() && j < other.entries.len() {
            let (ta, wa) = self.entries[i];
            let (tb, wb) = other.entries[j];
            match ta.cmp(&tb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn normalize_l2(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}

/// IDF variant used when weighting terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdfMode {
    /// `ln((1 + n) / (1 + df)) + 1`; never zero, so terms in every
    /// document still carry weight.
    #[default]
    Smooth,
    /// `ln(n / df)`; terms in every document get zero weight.
    Raw,
}

impl IdfMode {
    #[must_use]
    pub fn idf(self, n_docs: usize, df: usize) -> f32 {
        let n = n_docs as f64;
        let df = df as f64;
        let value = match self {
            Self::Smooth => ((1.0 + n) / (1.0 + df)).ln() + 1.0,
            Self::Raw => (n / df).ln(),
        };
        value as f32
    }
}

/// TF-IDF document vectors over a corpus-derived vocabulary.
///
/// Built once from the full corpus; adding or removing a document means
/// building a new index.
#[derive(Debug, Clone, Default)]
pub struct VectorIndex {
    vocabulary: HashMap<String, u32>,
    idf: Vec<f32>,
    vectors: Vec<SparseVector>,
}

impl VectorIndex {
    /// Builds L2-normalized TF-IDF vectors for every document, in order.
    ///
    /// Term ids follow the lexicographic order of the vocabulary, so the
    /// same corpus always yields the same ids.
    pub fn build<S: AsRef<str>>(documents: &[S], tokenizer: &Tokenizer, mode: IdfMode) -> Self {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| tokenizer.terms(doc.as_ref()))
            .collect();

        // document frequency per term, ordered by term text
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for terms in &tokenized {
            let mut unique: Vec<&str> = terms.iter().map(String::as_str).collect();
            unique.sort_unstable();
            unique.dedup();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let n_docs = documents.len();
        let mut vocabulary = HashMap::with_capacity(doc_freq.len());
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (id, (term, df)) in doc_freq.iter().enumerate() {
            vocabulary.insert((*term).to_string(), id as u32);
            idf.push(mode.idf(n_docs, *df));
        }

        let vectors = tokenized
            .iter()
            .map(|terms| {
                let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
                for term in terms {
                    if let Some(&id) = vocabulary.get(term) {
                        *counts.entry(id).or_insert(0) += 1;
                    }
                }
                let mut vector = SparseVector::from_sorted(
                    counts
                        .into_iter()
                        .map(|(id, tf)| (id, tf as f32 * idf[id as usize]))
                        .filter(|(_, w)| *w != 0.0)
                        .collect(),
                );
                vector.normalize_l2();
                vector
            })
            .collect::<Vec<_>>();

        debug!(
            documents = n_docs,
            vocabulary = vocabulary.len(),
            "built tf-idf vectors"
        );

        Self {
            vocabulary,
            idf,
            vectors,
        }
    }

    /// Number of indexed documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    #[must_use]
    pub fn term_id(&self, term: &str) -> Option<u32> {
        self.vocabulary.get(term).copied()
    }

    /// Global IDF weight of a term, if it is in the vocabulary.
    #[must_use]
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.term_id(term).map(|id| self.idf[id as usize])
    }

    #[must_use]
    pub fn vector(&self, doc: usize) -> Option<&SparseVector> {
        self.vectors.get(doc)
    }

    #[must_use]
    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }
}
