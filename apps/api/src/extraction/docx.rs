use std::io::{Cursor, Read};

use anyhow::{bail, Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::warn;

use crate::extraction::normalize_extracted;

const DOCUMENT_PART: &str = "word/document.xml";

/// Upper bound on the inflated size of `word/document.xml`. Uploads are capped
/// compressed, so this keeps a small zip bomb from expanding without limit.
pub const MAX_DOCUMENT_XML_BYTES: u64 = 32 * 1024 * 1024;

/// Raw text of a DOCX file, or `""` if it cannot be read.
pub fn extract_docx_text(bytes: &[u8]) -> String {
    extract_docx_text_capped(bytes, MAX_DOCUMENT_XML_BYTES)
}

fn extract_docx_text_capped(bytes: &[u8], max_xml_bytes: u64) -> String {
    match read_document_xml(bytes, max_xml_bytes).and_then(|xml| document_text(&xml)) {
        Ok(text) => normalize_extracted(&text),
        Err(e) => {
            warn!("DOCX extraction failed: {e:#}");
            String::new()
        }
    }
}

fn read_document_xml(bytes: &[u8], max_xml_bytes: u64) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).context("not a zip container")?;
    let part = archive
        .by_name(DOCUMENT_PART)
        .with_context(|| format!("missing {DOCUMENT_PART}"))?;
    if part.size() > max_xml_bytes {
        bail!(
            "{DOCUMENT_PART} declares {} bytes, limit is {max_xml_bytes}",
            part.size()
        );
    }

    // The declared size can lie; read one byte past the limit to detect it.
    let mut raw = Vec::new();
    part.take(max_xml_bytes + 1)
        .read_to_end(&mut raw)
        .with_context(|| format!("failed to inflate {DOCUMENT_PART}"))?;
    if raw.len() as u64 > max_xml_bytes {
        bail!("{DOCUMENT_PART} inflates past {max_xml_bytes} bytes");
    }
    String::from_utf8(raw).with_context(|| format!("{DOCUMENT_PART} is not UTF-8"))
}

/// Concatenates `w:t` runs; paragraphs end with a blank line, `w:tab` becomes a
/// space and `w:br`/`w:cr` a newline.
fn document_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event().context("malformed document.xml")? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => out.push_str("\n\n"),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => out.push(' '),
                b"w:br" | b"w:cr" => out.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text_run => {
                out.push_str(&t.unescape().context("bad text escape")?);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    /// Builds a minimal DOCX container around the given `w:body` content.
    pub(crate) fn docx_with_body(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(DOCUMENT_PART, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_paragraphs_tabs_and_breaks() {
        let docx = docx_with_body(
            "<w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Skills</w:t><w:tab/><w:t>Rust &amp; Go</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Line one</w:t><w:br/><w:t>Line two</w:t></w:r></w:p>",
        );
        assert_eq!(
            extract_docx_text(&docx),
            "Jane Doe\n\nSkills Rust & Go\n\nLine one\nLine two"
        );
    }

    #[test]
    fn test_runs_in_one_paragraph_concatenate() {
        let docx = docx_with_body(
            r#"<w:p><w:r><w:t xml:space="preserve">Node</w:t></w:r><w:r><w:t>.js</w:t></w:r></w:p>"#,
        );
        assert_eq!(extract_docx_text(&docx), "Node.js");
    }

    #[test]
    fn test_document_inflating_past_limit_yields_empty() {
        let run = "a".repeat(64 * 1024);
        let docx = docx_with_body(&format!("<w:p><w:r><w:t>{run}</w:t></w:r></w:p>"));
        assert!(docx.len() < 4 * 1024, "fixture should compress well");

        assert_eq!(extract_docx_text_capped(&docx, 16 * 1024), "");
        assert_eq!(extract_docx_text_capped(&docx, 1024 * 1024).len(), run.len());
    }

    #[test]
    fn test_not_a_zip_yields_empty() {
        assert_eq!(extract_docx_text(b"%PDF-1.4 definitely not docx"), "");
    }

    #[test]
    fn test_zip_without_document_yields_empty() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/other.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<x/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();
        assert_eq!(extract_docx_text(&bytes), "");
    }
}
