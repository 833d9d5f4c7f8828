use tracing::debug;

use crate::index::tfidf::VectorIndex;

/// Dense N×N matrix of pairwise cosine similarities.
///
/// Row-major, symmetric, with `1.0` on the diagonal. Document vectors are
/// unit length, so cosine similarity reduces to a dot product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f32>,
}

impl SimilarityMatrix {
    /// Computes every pairwise similarity of `index`.
    ///
    /// Dot products are accumulated through an inverted index (term →
    /// postings) so only documents sharing at least one term are visited.
    /// Only the upper triangle is computed; the lower one is mirrored from
    /// it, which keeps the matrix exactly symmetric.
    pub fn build(index: &VectorIndex) -> Self {
        let n = index.len();
        let mut data = vec![0.0f32; n * n];

        let mut postings: Vec<Vec<(usize, f32)>> = vec![Vec::new(); index.vocabulary_size()];
        for (doc, vector) in index.vectors().iter().enumerate() {
            for &(term, weight) in vector.entries() {
                postings[term as usize].push((doc, weight));
            }
        }

        let mut row = vec![0.0f32; n];
        for (i, vector) in index.vectors().iter().enumerate() {
            row.fill(0.0);
            for &(term, weight) in vector.entries() {
                for &(j, other) in &postings[term as usize] {
                    if j > i {
                        row[j] += weight * other;
                    }
                }
            }

            data[i * n + i] = 1.0;
            for j in (i + 1)..n {
                let score = row[j].clamp(0.0, 1.0);
                data[i * n + j] = score;
                data[j * n + i] = score;
            }
        }

        debug!(documents = n, "built similarity matrix");
        Self { n, data }
    }

    /// Number of rows (and columns).
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Similarities of document `i` to every document, in catalog order.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        (i < self.n).then(|| &self.data[i * self.n..(i + 1) * self.n])
    }

    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        (i < self.n && j < self.n).then(|| self.data[i * self.n + j])
    }
}
