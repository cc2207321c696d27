//! Integration tests running the real strategy chain against small
//! generated PDFs (built with lopdf, parsed back by MuPDF and lopdf).

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use textsift_core::{ExtractError, ExtractionConfig, PdfStrategy, SourceDocument};
use textsift_pdf::{extract_pdf, FullPath};

/// Build a one-text-line-per-page PDF with Helvetica.
fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize PDF");
    bytes
}

fn pdf_doc(bytes: Vec<u8>) -> SourceDocument {
    SourceDocument::new(bytes, "application/pdf", "generated.pdf")
}

const PAGE_ONE: &str = "Jane Doe, senior systems engineer, ten years of Rust";
const PAGE_TWO: &str = "Previously: storage engines, protocol plumbing, CLIs";

#[tokio::test]
async fn chain_extracts_generated_pdf() {
    let doc = pdf_doc(build_pdf(&[PAGE_ONE]));
    let text = extract_pdf(&doc, &ExtractionConfig::default())
        .await
        .expect("extraction should succeed");
    assert!(text.contains("senior systems engineer"), "got: {text}");
}

#[tokio::test]
async fn chain_is_idempotent() {
    let doc = pdf_doc(build_pdf(&[PAGE_ONE]));
    let config = ExtractionConfig::default();
    let first = extract_pdf(&doc, &config).await.expect("first run");
    let second = extract_pdf(&doc, &config).await.expect("second run");
    assert_eq!(first, second);
}

#[tokio::test]
async fn full_path_keeps_page_order() {
    let doc = pdf_doc(build_pdf(&[PAGE_ONE, PAGE_TWO]));
    let config = ExtractionConfig::default();
    let text = FullPath
        .attempt(&doc, &config)
        .await
        .expect("full path should succeed");
    let first = text.find("senior systems engineer").expect("page one text");
    let second = text.find("storage engines").expect("page two text");
    assert!(first < second, "pages out of order: {text}");
}

#[tokio::test]
async fn full_path_respects_page_cap() {
    let pages: Vec<String> = (0..5)
        .map(|i| format!("Page number {i} with enough text to matter"))
        .collect();
    let page_refs: Vec<&str> = pages.iter().map(String::as_str).collect();
    let doc = pdf_doc(build_pdf(&page_refs));

    let config = ExtractionConfig::default().with_page_caps(2, 1);
    let text = FullPath
        .attempt(&doc, &config)
        .await
        .expect("full path should succeed");
    assert!(text.contains("Page number 1"));
    assert!(!text.contains("Page number 2"), "cap ignored: {text}");
}

#[tokio::test]
async fn zero_bytes_is_empty_or_corrupt() {
    let doc = pdf_doc(Vec::new());
    let err = extract_pdf(&doc, &ExtractionConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractError::EmptyOrCorrupt(_)), "got: {err}");
}

#[tokio::test]
async fn garbage_bytes_report_every_strategy() {
    let doc = pdf_doc(vec![b'A'; 300]);
    let err = extract_pdf(&doc, &ExtractionConfig::default())
        .await
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("fast:"), "got: {message}");
    assert!(message.contains("full:"), "got: {message}");
    assert!(message.contains("legacy:"), "got: {message}");
    assert!(message.contains("missing %PDF header"), "got: {message}");
}
