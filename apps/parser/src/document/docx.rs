use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::errors::ParseError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extracts the body text of a DOCX file.
/// Each paragraph becomes one line; tabs and line breaks are preserved.
pub fn extract_text(bytes: &[u8]) -> Result<String, ParseError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ParseError::Docx(format!("{DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)?;

    document_xml_to_text(&xml)
}

fn document_xml_to_text(xml: &str) -> Result<String, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Event::End(ref e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Empty(ref e) => match e.name().as_ref() {
                b"w:tab" => out.push('\t'),
                b"w:br" | b"w:cr" => out.push('\n'),
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text_run => out.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Roe</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">jane@example.com </w:t></w:r><w:r><w:tab/><w:t>+1 555 123 4567</w:t></w:r></w:p>
    <w:p/>
    <w:p><w:r><w:instrText>HYPERLINK</w:instrText><w:t>R&amp;D Engineer</w:t></w:r></w:p>
    <w:p><w:r><w:t>Acme Inc</w:t><w:br/><w:t>Berlin</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buf);
            zip.start_file(DOCUMENT_PART, zip::write::FileOptions::default())
                .unwrap();
            zip.write_all(document_xml.as_bytes()).unwrap();
            zip.finish().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn test_paragraphs_become_lines() {
        let text = extract_text(&build_docx(BODY)).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Jane Roe");
        assert_eq!(lines[1], "jane@example.com \t+1 555 123 4567");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "R&D Engineer");
    }

    #[test]
    fn test_line_break_splits_paragraph() {
        let text = extract_text(&build_docx(BODY)).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[4], "Acme Inc");
        assert_eq!(lines[5], "Berlin");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_instr_text_is_skipped() {
        let text = extract_text(&build_docx(BODY)).unwrap();
        assert!(!text.contains("HYPERLINK"));
    }

    #[test]
    fn test_missing_document_part() {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buf);
            zip.start_file("other.xml", zip::write::FileOptions::default())
                .unwrap();
            zip.write_all(b"<x/>").unwrap();
            zip.finish().unwrap();
        }
        let err = extract_text(&buf.into_inner()).unwrap_err();
        assert!(matches!(err, ParseError::Docx(_)));
    }

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(
            extract_text(b"plain bytes").unwrap_err(),
            ParseError::Docx(_)
        ));
    }
}
