//! # Index Tokenizer
//!
//! Splits composed feature strings into lowercase word tokens for TF-IDF
//! weighting, dropping short tokens and English stop words.

use regex::Regex;

use crate::error::{Result, ShioriError};
use crate::normalize::StopWords;

/// A token extracted from a feature string with positional information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The lowercased token text
    pub text: String,
    /// Byte offset of the token start in the lowercased input
    pub start: usize,
    /// Byte offset one past the token end in the lowercased input
    pub end: usize,
}

/// Word tokenizer for the vector index.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    re_word: Regex,
    stop_words: StopWords,
}

impl Tokenizer {
    /// Create a tokenizer that keeps runs of at least `min_len` word
    /// characters and drops the index stop word list.
    ///
    /// # Errors
    ///
    /// Returns `ShioriError::InvalidConfig` if `min_len` is zero.
    pub fn new(min_len: usize) -> Result<Self> {
        if min_len == 0 {
            return Err(ShioriError::InvalidConfig(
                "minimum token length must be at least 1".into(),
            ));
        }
        Ok(Self {
            re_word: Regex::new(&format!(r"\w{{{min_len},}}"))?,
            stop_words: StopWords::index(),
        })
    }

    /// Tokenize a feature string.
    ///
    /// # Examples
    /// ```
    /// use shiori_core::index::Tokenizer;
    ///
    /// let tokenizer = Tokenizer::new(2).unwrap();
    /// let tokens = tokenizer.tokenize("The Dune saga by Frank Herbert");
    /// let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
    /// assert_eq!(texts, ["dune", "saga", "frank", "herbert"]);
    /// ```
    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        let lowered = input.to_lowercase();
        self.re_word
            .find_iter(&lowered)
            .filter(|m| !self.stop_words.contains(m.as_str()))
            .map(|m| Token {
                text: m.as_str().to_string(),
                start: m.start(),
                end: m.end(),
            })
            .collect()
    }

    /// Tokenize and keep only the token texts.
    pub fn terms(&self, input: &str) -> Vec<String> {
        self.tokenize(input).into_iter().map(|t| t.text).collect()
    }
}
