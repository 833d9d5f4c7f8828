use std::fmt;

use serde::{Deserialize, Serialize};

use super::phase::SearchPhase;
use super::record::Record;

/// User-facing message carried by [`Outcome::NotFound`].
pub const NOT_FOUND_MESSAGE: &str =
    "Book not found. Please try a different title, author, or publisher.";

/// One ranked neighbor of the matched book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// 1-based rank in the result list.
    pub rank: usize,
    /// Catalog position of the recommended book.
    pub index: usize,
    /// Cosine similarity to the matched book, in `[0.0, 1.0]`.
    pub score: f32,
    /// The recommended book.
    pub book: Record,
}

/// Result of resolving one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// No title, author, or publisher contains the query.
    NotFound { message: String },

    /// A record matched; `recommendations` may be empty on tiny catalogs.
    Found {
        /// Catalog position of the matched record.
        matched: usize,
        /// Phase that produced the match.
        phase: SearchPhase,
        recommendations: Vec<Recommendation>,
    },
}

impl Outcome {
    #[must_use]
    pub fn not_found() -> Self {
        Self::NotFound {
            message: NOT_FOUND_MESSAGE.to_string(),
        }
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Ranked neighbors, empty for `NotFound`.
    #[must_use]
    pub fn recommendations(&self) -> &[Recommendation] {
        match self {
            Self::NotFound { .. } => &[],
            Self::Found {
                recommendations, ..
            } => recommendations,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { message } => write!(f, "{message}"),
            Self::Found {
                matched,
                phase,
                recommendations,
            } => write!(
                f,
                "Outcome(matched={matched}, phase={phase}, results={})",
                recommendations.len()
            ),
        }
    }
}
