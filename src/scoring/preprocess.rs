//! Text normalization applied before tokenization

/// Normalize raw text for scoring.
///
/// Keeps ASCII letters (lowercased) and ASCII whitespace; everything else,
/// including digits, punctuation and accented letters, is dropped without
/// a separator, so `"don't"` becomes `"dont"`.
pub fn preprocess(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphabetic() || is_separator(*c))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Whitespace recognized by the tokenizer (ASCII space, tab, newlines,
/// vertical tab, form feed)
pub(crate) fn is_separator(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0B'
}
