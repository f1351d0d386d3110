//! TF-IDF score aggregation and rounding

use super::frequency::{InverseDocumentFrequency, TermFrequency};

/// Sum `(tf1 + tf2) * idf` over the vocabulary.
///
/// Shared terms have an IDF of 0, so only terms exclusive to one document
/// contribute.
pub fn aggregate(
    first: &TermFrequency,
    second: &TermFrequency,
    idf: &InverseDocumentFrequency,
) -> f64 {
    idf.iter()
        .map(|(term, weight)| (first.get(term) + second.get(term)) as f64 * weight)
        .sum()
}

/// Round to two decimal places, ties away from zero.
///
/// Operates on `raw * 100.0` as computed in binary floating point, so a raw
/// value of `1.005` (stored as `1.00499…`) rounds down to `1.0`.
pub fn round_score(raw: f64) -> f64 {
    (raw * 100.0).round() / 100.0
}
