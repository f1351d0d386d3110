//! Term frequency, vocabulary and inverse document frequency

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Size of the corpus: the reference and the candidate text
pub const TOTAL_DOCUMENTS: usize = 2;

/// Occurrence count of each token within one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermFrequency {
    counts: HashMap<String, usize>,
}

impl TermFrequency {
    /// Count the tokens of a document
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut counts = HashMap::new();
        for token in tokens {
            *counts.entry(token.as_ref().to_string()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Occurrences of `term`, or 0 when the document does not contain it
    pub fn get(&self, term: &str) -> usize {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Whether the document contains `term` at least once
    pub fn contains(&self, term: &str) -> bool {
        self.counts.contains_key(term)
    }

    /// Distinct terms of the document
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Distinct terms appearing in either document.
///
/// Ordered so that score summation happens in the same order on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    terms: BTreeSet<String>,
}

impl Vocabulary {
    /// Union of the terms of both documents
    pub fn union(first: &TermFrequency, second: &TermFrequency) -> Self {
        let terms = first
            .terms()
            .chain(second.terms())
            .map(str::to_string)
            .collect();
        Self { terms }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Number of documents containing `term` (membership, not occurrences)
pub fn document_frequency(term: &str, documents: [&TermFrequency; TOTAL_DOCUMENTS]) -> usize {
    documents.iter().filter(|doc| doc.contains(term)).count()
}

/// `ln(TOTAL_DOCUMENTS / df)` for every vocabulary term
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InverseDocumentFrequency {
    weights: BTreeMap<String, f64>,
}

impl InverseDocumentFrequency {
    /// Compute IDF over the two-document corpus.
    ///
    /// Every vocabulary term comes from at least one document, so df is 1 or 2
    /// and the logarithm is always defined.
    pub fn compute(vocabulary: &Vocabulary, documents: [&TermFrequency; TOTAL_DOCUMENTS]) -> Self {
        let weights = vocabulary
            .iter()
            .map(|term| {
                let df = document_frequency(term, documents);
                let idf = (TOTAL_DOCUMENTS as f64 / df as f64).ln();
                (term.to_string(), idf)
            })
            .collect();
        Self { weights }
    }

    /// IDF of a vocabulary term
    pub fn get(&self, term: &str) -> Option<f64> {
        self.weights.get(term).copied()
    }

    /// Terms and their weights, in vocabulary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(term, idf)| (term.as_str(), *idf))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }
}
