//! Raw-text extraction from OOXML wordprocessing (`.docx`) bytes.
//!
//! A `.docx` file is a zip container; the body text lives in
//! `word/document.xml`. Text runs (`w:t`) are collected in document order,
//! with a line break per paragraph (`w:p`) and explicit break (`w:br`),
//! and a tab per `w:tab`.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use zip::ZipArchive;

#[derive(Error, Debug)]
pub enum DocxError {
    #[error("not a DOCX container: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("missing word/document.xml part")]
    MissingDocumentPart,
    #[error("malformed document XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extract the plain body text of a wordprocessing document.
pub fn extract_raw_text(bytes: &[u8]) -> Result<String, DocxError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    {
        let mut part = archive.by_name("word/document.xml").map_err(|e| match e {
            zip::result::ZipError::FileNotFound => DocxError::MissingDocumentPart,
            other => DocxError::Zip(other),
        })?;
        part.read_to_string(&mut xml)?;
    }
    document_text(&xml)
}

fn document_text(xml: &str) -> Result<String, DocxError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut text = String::new();
    let mut in_text_run = false;
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.local_name().as_ref() == b"t" => {
                in_text_run = true;
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" => text.push('\n'),
                _ => {}
            },
            Event::Text(ref e) if in_text_run => {
                let run = e.unescape().map_err(quick_xml::Error::from)?;
                text.push_str(&run);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    use super::*;

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
    <w:p><w:r><w:t>Senior</w:t><w:tab/><w:t>Engineer</w:t></w:r></w:p>
    <w:p><w:r><w:t>Line one</w:t><w:br/><w:t>Line two</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn extracts_paragraphs_tabs_and_breaks() {
        let bytes = build_docx(SAMPLE);
        let text = extract_raw_text(&bytes).unwrap();
        assert_eq!(text, "Jane Doe\nSenior\tEngineer\nLine one\nLine two\n");
    }

    #[test]
    fn unescapes_entities() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body><w:p><w:r><w:t>R&amp;D lead</w:t></w:r></w:p></w:body></w:document>"#;
        let text = extract_raw_text(&build_docx(xml)).unwrap();
        assert_eq!(text, "R&D lead\n");
    }

    #[test]
    fn zip_without_document_part() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("unrelated.txt", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"nothing").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        assert!(matches!(
            extract_raw_text(&bytes),
            Err(DocxError::MissingDocumentPart)
        ));
    }

    #[test]
    fn non_zip_bytes_fail() {
        assert!(matches!(
            extract_raw_text(b"plain old text"),
            Err(DocxError::Zip(_))
        ));
    }

    #[test]
    fn ignores_non_text_elements() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body><w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t>Centered heading</w:t></w:r></w:p></w:body></w:document>"#;
        let text = extract_raw_text(&build_docx(xml)).unwrap();
        assert_eq!(text, "Centered heading\n");
    }
}
