//! Text Similarity Scoring
//!
//! Compares a reference translation with OCR output using a TF-IDF weighted
//! term overlap over the two-document corpus formed by the pair.
//!
//! Stages: preprocess → tokenize + stem → term frequency → IDF → aggregate.
//! Every function here is pure; nothing is cached between calls.

pub mod aggregate;
pub mod frequency;
pub mod preprocess;
pub mod similarity;
pub mod tokenizer;

use serde::Serialize;

pub use aggregate::{aggregate, round_score};
pub use frequency::{InverseDocumentFrequency, TermFrequency, Vocabulary};
pub use preprocess::preprocess;
pub use similarity::cosine_similarity;
pub use tokenizer::Tokenizer;

/// Normalize, tokenize and stem a text into a document
pub fn analyze(tokenizer: &Tokenizer, text: &str) -> Vec<String> {
    tokenizer.tokenize(&preprocess(text))
}

/// TF-IDF score of two texts, rounded to two decimals.
///
/// Symmetric, 0 for identical texts, and defined for any input including
/// empty strings.
pub fn tfidf_score(first: &str, second: &str) -> f64 {
    compare(first, second).tfidf
}

/// Scores produced for one reference/candidate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    /// TF-IDF term overlap score (higher means more divergent vocabulary)
    pub tfidf: f64,
    /// Cosine similarity of term-frequency vectors, as a percentage
    pub cosine_percent: f64,
}

/// Run both metrics over a single analysis of the two texts
pub fn compare(reference: &str, candidate: &str) -> Comparison {
    let tokenizer = Tokenizer::new();
    let first = TermFrequency::from_tokens(&analyze(&tokenizer, reference));
    let second = TermFrequency::from_tokens(&analyze(&tokenizer, candidate));

    let vocabulary = Vocabulary::union(&first, &second);
    let idf = InverseDocumentFrequency::compute(&vocabulary, [&first, &second]);

    Comparison {
        tfidf: round_score(aggregate(&first, &second, &idf)),
        cosine_percent: similarity::to_percent(cosine_similarity(&first, &second, &vocabulary)),
    }
}
