//! Whitespace tokenizer with Snowball stemming

use rust_stemmers::{Algorithm, Stemmer};

use super::preprocess::is_separator;

/// Splits normalized text into stemmed tokens.
///
/// Duplicates and order are kept: the output is a document, not a set.
pub struct Tokenizer {
    stemmer: Stemmer,
}

impl Tokenizer {
    /// Create a tokenizer using the English (Porter2) stemmer
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Reduce a single lowercase token to its root
    pub fn stem(&self, token: &str) -> String {
        self.stemmer.stem(token).into_owned()
    }

    /// Tokenize normalized text
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(is_separator)
            .filter(|token| !token.is_empty())
            .map(|token| self.stem(token))
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}
