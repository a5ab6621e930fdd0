//! Text normalization and word tokenization shared by every analyzer.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Minimum token length kept by `tokenize_words`.
const MIN_TOKEN_LEN: usize = 3;

const STOPWORDS_LIST: &[&str] = &[
    "the", "a", "an", "and", "or", "to", "of", "in", "for", "with", "on", "at", "by", "from",
    "as", "is", "are", "was", "were", "be", "being", "been", "that", "this", "these", "those",
    "it", "its", "you", "your", "we", "our", "they", "their", "will", "can", "may", "must",
    "should", "would", "could", "not", "no", "yes", "if", "then", "than", "so", "such", "into",
    "about", "over", "under", "between", "within",
];

static STOPWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS_LIST.iter().copied().collect());

/// CRLF → LF, NBSP → space, collapses runs of spaces, trims.
pub fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\u{a0}', " ");
    collapse_spaces(&unified).trim().to_string()
}

/// `normalize` plus punctuation stripping: everything except ASCII letters,
/// digits, `+`, `.`, `#`, space and newline becomes a space. Keeps tokens like
/// `c++`, `c#` and `node.js` intact.
pub fn normalize_strict(text: &str) -> String {
    let cleaned: String = text
        .replace("\r\n", "\n")
        .chars()
        .map(|c| match c {
            c if c.is_ascii_alphanumeric() => c,
            '+' | '.' | '#' | '\n' | ' ' => c,
            _ => ' ',
        })
        .collect();
    collapse_spaces(&cleaned).trim().to_string()
}

/// Lowercase word tokens in source order, minus short tokens and stopwords.
pub fn tokenize_words(text: &str) -> Vec<String> {
    normalize_strict(text)
        .to_lowercase()
        .split_whitespace()
        .filter(|w| w.len() >= MIN_TOKEN_LEN)
        .filter(|w| !STOPWORDS.contains(w))
        .map(String::from)
        .collect()
}

fn collapse_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_space = false;
    for c in text.chars() {
        if c == ' ' {
            if !prev_space {
                out.push(c);
            }
            prev_space = true;
        } else {
            out.push(c);
            prev_space = false;
        }
    }
    out
}

/// Rewrites every `\b` in a pattern to the ASCII-only `(?-u:\b)`, so a keyword
/// directly next to a non-ASCII letter (`経験React`) still sits on a boundary.
pub fn ascii_word_boundaries(pattern: &str) -> String {
    pattern.replace(r"\b", r"(?-u:\b)")
}
