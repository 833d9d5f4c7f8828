use regex::Regex;

use crate::error::Result;
use crate::normalize::language::canonical_language;
use crate::normalize::stopwords::StopWords;
use crate::types::{RawRecord, Record};

/// Field normalizer for raw catalog metadata.
///
/// Holds the pre-compiled patterns for every field so a whole catalog can be
/// cleaned without recompiling. All methods are total over string input:
/// blank input yields an empty string (or `unknown` for the language).
#[derive(Debug, Clone)]
pub struct Normalizer {
    re_parenthetical: Regex,
    re_non_alnum: Regex,
    re_whitespace: Regex,
    re_publisher_suffix: Regex,
    title_stop_words: StopWords,
}

impl Normalizer {
    /// Constructs a new `Normalizer` with pre-compiled regex patterns.
    ///
    /// # Errors
    ///
    /// Returns `ShioriError::RegexError` if any pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_parenthetical: Regex::new(r"\([^)]*\)")?,
            re_non_alnum: Regex::new(r"[^a-zA-Z0-9\s]")?,
            re_whitespace: Regex::new(r"\s+")?,
            re_publisher_suffix: Regex::new(
                r"\s*(inc\.|corporation|co\.|ltd\.|company|corp\.|\(.*\))\s*",
            )?,
            title_stop_words: StopWords::title(),
        })
    }

    /// Lowercases, drops parenthesized annotations and punctuation, and
    /// removes English stop words.
    ///
    /// ```
    /// use shiori_core::Normalizer;
    ///
    /// let n = Normalizer::new().unwrap();
    /// assert_eq!(
    ///     n.clean_title("The Hobbit (Middle-earth Universe)"),
    ///     "hobbit"
    /// );
    /// ```
    pub fn clean_title(&self, title: &str) -> String {
        let lowered = title.to_lowercase();
        let without_notes = self.re_parenthetical.replace_all(&lowered, "");
        let alnum = self.re_non_alnum.replace_all(&without_notes, "");

        alnum
            .split_whitespace()
            .filter(|word| !self.title_stop_words.contains(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Keeps the primary author only (the first `/`-separated name).
    pub fn standardize_authors(&self, authors: &str) -> String {
        let primary = authors.split('/').next().unwrap_or("").trim();
        self.re_whitespace.replace_all(primary, " ").to_lowercase()
    }

    /// Strips corporate suffixes and parenthetical notes from a publisher.
    ///
    /// The suffix pattern also consumes the whitespace around it, so
    /// `"Penguin Inc. Books"` becomes `"penguinbooks"`.
    pub fn standardize_publisher(&self, publisher: &str) -> String {
        let lowered = publisher.trim().to_lowercase();
        let stripped = self.re_publisher_suffix.replace_all(&lowered, "");
        self.re_whitespace.replace_all(&stripped, " ").into_owned()
    }

    /// Maps a language code to its canonical form, or `unknown`.
    pub fn clean_language(&self, language: &str) -> String {
        canonical_language(language).to_string()
    }

    /// Normalizes every field of a raw row and composes its feature string.
    pub fn normalize(&self, raw: &RawRecord) -> Record {
        Record::new(
            self.clean_title(&raw.title),
            self.standardize_authors(&raw.authors),
            self.standardize_publisher(&raw.publisher),
            self.clean_language(&raw.language),
        )
    }
}
