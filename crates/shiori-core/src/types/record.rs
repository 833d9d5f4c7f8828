use std::fmt;

use serde::{Deserialize, Serialize};

/// One catalog row as read from the source, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub title: String,
    pub authors: String,
    pub publisher: String,
    pub language: String,
}

impl RawRecord {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        authors: impl Into<String>,
        publisher: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            authors: authors.into(),
            publisher: publisher.into(),
            language: language.into(),
        }
    }
}

/// A normalized catalog entry.
///
/// Fields are private so the composed feature string can never drift from
/// the four fields it is derived from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    title: String,
    authors: String,
    publisher: String,
    language: String,
    combined_features: String,
}

impl Record {
    /// Builds a record from already-normalized fields and composes
    /// `combined_features` as `title authors publisher language`.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        authors: impl Into<String>,
        publisher: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let authors = authors.into();
        let publisher = publisher.into();
        let language = language.into();
        let combined_features = compose_features(&title, &authors, &publisher, &language);

        Self {
            title,
            authors,
            publisher,
            language,
            combined_features,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn authors(&self) -> &str {
        &self.authors
    }

    #[must_use]
    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The text signal fed to the vector index.
    #[must_use]
    pub fn combined_features(&self) -> &str {
        &self.combined_features
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} by {:?} ({})", self.title, self.authors, self.publisher)
    }
}

/// Joins the four normalized fields with single spaces, in fixed order.
pub fn compose_features(title: &str, authors: &str, publisher: &str, language: &str) -> String {
    format!("{title} {authors} {publisher} {language}")
}
