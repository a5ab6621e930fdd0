use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::extraction::normalize_extracted;

/// Cap on literal strings kept by the fallback scraper.
const MAX_SCRAPED_LITERALS: usize = 200;

static LITERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^()]{3,200})\)").expect("static pdf literal regex"));

static LETTERS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]{3}").expect("static letters regex"));

/// Extracts text with `pdf-extract`, falling back to literal scraping when the
/// parser errors, panics, or finds nothing but whitespace.
pub fn extract_pdf_text(bytes: &[u8]) -> String {
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => {
            let text = normalize_extracted(&text);
            if !text.is_empty() {
                return text;
            }
            warn!("pdf-extract returned no text; scraping PDF literals instead");
        }
        Ok(Err(e)) => warn!("pdf-extract failed ({e:?}); scraping PDF literals instead"),
        Err(_) => warn!("pdf-extract panicked; scraping PDF literals instead"),
    }

    normalize_extracted(&scrape_pdf_literals(bytes))
}

/// Last-resort recovery for malformed PDFs: collects `(...)` string objects
/// that contain at least three consecutive ASCII letters.
///
/// Bytes are decoded as Latin-1 so every byte maps to one char.
pub fn scrape_pdf_literals(bytes: &[u8]) -> String {
    let raw: String = bytes.iter().map(|&b| b as char).collect();
    LITERAL_RE
        .captures_iter(&raw)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .filter(|s| LETTERS_RE.is_match(s))
        .take(MAX_SCRAPED_LITERALS)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BROKEN_PDF: &[u8] =
        b"%PDF-1.4\n1 0 obj BT (Jane Doe) Tj (12) Tj (Senior Engineer\xe9) Tj (x) ET\n%%EOF";

    #[test]
    fn test_scrape_keeps_wordy_literals_only() {
        let text = scrape_pdf_literals(BROKEN_PDF);
        assert_eq!(text, "Jane Doe Senior Engineer\u{e9}");
    }

    #[test]
    fn test_scrape_caps_literal_count() {
        let mut raw = Vec::new();
        for i in 0..250 {
            raw.extend_from_slice(format!("(Word{i}) ").as_bytes());
        }
        let text = scrape_pdf_literals(&raw);
        assert_eq!(text.split(' ').count(), MAX_SCRAPED_LITERALS);
        assert!(text.ends_with("Word199"));
    }

    #[test]
    fn test_scrape_ignores_oversized_literals() {
        let long = format!("({})", "a".repeat(201));
        assert_eq!(scrape_pdf_literals(long.as_bytes()), "");
    }

    #[test]
    fn test_malformed_pdf_falls_back_to_scraping() {
        let text = extract_pdf_text(BROKEN_PDF);
        assert!(text.contains("Jane Doe"), "got {text:?}");
        assert!(text.contains("Senior Engineer"));
    }

    #[test]
    fn test_empty_input_yields_empty_text() {
        assert_eq!(extract_pdf_text(b""), "");
    }
}
