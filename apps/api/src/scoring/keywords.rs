use std::collections::HashMap;

use crate::scoring::text::tokenize_words;

/// Limit used for the combined title + JD vocabulary.
pub const JD_KEYWORD_LIMIT: usize = 40;
/// Limit used for title-only keywords (role alignment).
pub const TITLE_KEYWORD_LIMIT: usize = 10;

/// Returns up to `limit` distinct tokens ordered by descending frequency.
///
/// Equal counts keep first-seen order: counts are collected in insertion order
/// and the sort is stable.
pub fn extract_top_keywords(text: &str, limit: usize) -> Vec<String> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for word in tokenize_words(text) {
        match index.get(&word) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(word.clone(), counts.len());
                counts.push((word, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(limit).map(|(w, _)| w).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_by_frequency() {
        let kws = extract_top_keywords("rust rust rust python python golang", 10);
        assert_eq!(kws, vec!["rust", "python", "golang"]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let kws = extract_top_keywords("zeta alpha mango alpha zeta mango", 10);
        assert_eq!(kws, vec!["zeta", "alpha", "mango"]);
    }

    #[test]
    fn test_respects_limit() {
        let kws = extract_top_keywords("one1 two2 three3 four4 five5", 2);
        assert_eq!(kws, vec!["one1", "two2"]);
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        assert!(extract_top_keywords("", JD_KEYWORD_LIMIT).is_empty());
        assert!(extract_top_keywords("the and of", JD_KEYWORD_LIMIT).is_empty());
    }
}
