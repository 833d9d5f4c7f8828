use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::record::Record;

/// The field a query was matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPhase {
    Title,
    Authors,
    Publisher,
}

impl SearchPhase {
    /// Returns the normalized field this phase searches.
    #[must_use]
    pub fn field(self, record: &Record) -> &str {
        match self {
            Self::Title => record.title(),
            Self::Authors => record.authors(),
            Self::Publisher => record.publisher(),
        }
    }
}

impl fmt::Display for SearchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => write!(f, "title"),
            Self::Authors => write!(f, "authors"),
            Self::Publisher => write!(f, "publisher"),
        }
    }
}

/// Caller-declared search category.
///
/// Advisory only: resolution always tries title, then authors, then
/// publisher, whatever the caller selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchBy {
    #[default]
    Title,
    Author,
    Publisher,
}

impl fmt::Display for SearchBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => write!(f, "title"),
            Self::Author => write!(f, "author"),
            Self::Publisher => write!(f, "publisher"),
        }
    }
}

impl FromStr for SearchBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "author" | "authors" => Ok(Self::Author),
            "publisher" => Ok(Self::Publisher),
            other => Err(format!("unknown search category: {other:?}")),
        }
    }
}
