//! Cosine similarity between term-frequency vectors

use super::frequency::{TermFrequency, Vocabulary};

/// Cosine of the angle between the raw term-frequency vectors of two
/// documents, in `[0, 1]`. Returns 0 when either document is empty.
pub fn cosine_similarity(first: &TermFrequency, second: &TermFrequency, vocabulary: &Vocabulary) -> f64 {
    let mut dot = 0.0;
    let mut norm_first = 0.0;
    let mut norm_second = 0.0;

    for term in vocabulary.iter() {
        let a = first.get(term) as f64;
        let b = second.get(term) as f64;
        dot += a * b;
        norm_first += a * a;
        norm_second += b * b;
    }

    if norm_first == 0.0 || norm_second == 0.0 {
        return 0.0;
    }

    (dot / (norm_first.sqrt() * norm_second.sqrt())).min(1.0)
}

/// Similarity as a whole-number percentage, ties away from zero
pub fn to_percent(similarity: f64) -> f64 {
    (similarity * 100.0).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectors(a: &[&str], b: &[&str]) -> (TermFrequency, TermFrequency, Vocabulary) {
        let first = TermFrequency::from_tokens(a);
        let second = TermFrequency::from_tokens(b);
        let vocabulary = Vocabulary::union(&first, &second);
        (first, second, vocabulary)
    }

    #[test]
    fn test_identical_documents() {
        let (first, second, vocabulary) = vectors(&["a", "b", "b"], &["b", "a", "b"]);
        let similarity = cosine_similarity(&first, &second, &vocabulary);
        assert!((similarity - 1.0).abs() < 1e-12);
        assert_eq!(to_percent(similarity), 100.0);
    }

    #[test]
    fn test_disjoint_documents() {
        let (first, second, vocabulary) = vectors(&["a"], &["b"]);
        assert_eq!(cosine_similarity(&first, &second, &vocabulary), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        // (1,1,1,0) . (1,0,1,1) = 2, |a| = |b| = sqrt(3)
        let (first, second, vocabulary) = vectors(&["the", "cat", "sat"], &["the", "dog", "sat"]);
        let similarity = cosine_similarity(&first, &second, &vocabulary);
        assert!((similarity - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(to_percent(similarity), 67.0);
    }

    #[test]
    fn test_empty_document() {
        let (first, second, vocabulary) = vectors(&[], &["a"]);
        assert_eq!(cosine_similarity(&first, &second, &vocabulary), 0.0);
    }
}
