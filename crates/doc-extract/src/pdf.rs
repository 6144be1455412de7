//! PDF text extraction from content streams
//!
//! Walks each page's text-showing operators with lopdf. Pages whose
//! content streams carry no text (scanned pages) come back empty, which
//! is what triggers the OCR fallback in [`crate::TextExtractor`].

use lopdf::{content::Content, Document, Object};

use crate::error::ExtractError;

/// Text of a single page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub page_number: u32,
    pub text: String,
}

/// Parse the PDF and extract text page by page
pub fn extract_pages(data: &[u8]) -> Result<Vec<PageText>, ExtractError> {
    let doc = Document::load_mem(data).map_err(|e| ExtractError::Pdf(e.to_string()))?;
    Ok(extract_from_document(&doc))
}

/// Join page texts the way the upload flow expects: every non-empty page
/// followed by a newline
pub fn join_pages(pages: &[PageText]) -> String {
    let mut text = String::new();
    for page in pages.iter().filter(|p| !p.text.is_empty()) {
        text.push_str(&page.text);
        text.push('\n');
    }
    text
}

fn extract_from_document(doc: &Document) -> Vec<PageText> {
    let mut pages = Vec::new();

    for (&page_number, &page_id) in doc.get_pages().iter() {
        let mut page_text = String::new();

        if let Ok(content) = doc.get_page_content(page_id) {
            if let Ok(content) = Content::decode(&content) {
                for op in content.operations {
                    match op.operator.as_str() {
                        "Tj" | "TJ" => {
                            for operand in &op.operands {
                                push_operand_text(&mut page_text, operand);
                            }
                        }
                        // ' and " move to the next line before showing text
                        "'" | "\"" => {
                            push_line_break(&mut page_text);
                            if let Some(operand) = op.operands.last() {
                                push_operand_text(&mut page_text, operand);
                            }
                        }
                        "T*" => push_line_break(&mut page_text),
                        "Td" | "TD" => {
                            let dy = op.operands.get(1).and_then(|o| o.as_float().ok());
                            if matches!(dy, Some(dy) if dy != 0.0) {
                                push_line_break(&mut page_text);
                            }
                        }
                        "ET" => {
                            if !page_text.is_empty() && !page_text.ends_with(char::is_whitespace)
                            {
                                page_text.push(' ');
                            }
                        }
                        _ => {}
                    }
                }
            }
        }

        pages.push(PageText {
            page_number,
            text: page_text.trim().to_string(),
        });
    }

    pages
}

fn push_line_break(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}

fn push_operand_text(text: &mut String, operand: &Object) {
    match operand {
        Object::String(bytes, _) => text.push_str(&decode_pdf_string(bytes)),
        Object::Array(items) => {
            for item in items {
                match item {
                    Object::String(bytes, _) => text.push_str(&decode_pdf_string(bytes)),
                    // Large negative kerning is a word gap
                    Object::Integer(n) if *n < -100 => text.push(' '),
                    Object::Real(n) if *n < -100.0 => text.push(' '),
                    _ => {}
                }
            }
        }
        _ => {}
    }
}

fn decode_pdf_string(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        if let Ok(s) = String::from_utf16(&units) {
            return s;
        }
    }
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }
    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}


#[cfg(test)]
mod tests {
    use super::test_support::create_test_pdf;
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extracts_each_page() {
        let data = create_test_pdf(&["Payment terms apply.", "Breach voids the warranty."]);
        let pages = extract_pages(&data).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[0].text, "Payment terms apply.");
        assert_eq!(pages[1].text, "Breach voids the warranty.");
    }

    #[test]
    fn test_line_moves_become_newlines() {
        let data = create_test_pdf(&["First line.\nSecond line."]);
        let pages = extract_pages(&data).unwrap();
        assert_eq!(pages[0].text, "First line.\nSecond line.");
    }

    #[test]
    fn test_scanned_page_is_empty() {
        let data = create_test_pdf(&[""]);
        let pages = extract_pages(&data).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].text.is_empty());
    }

    #[test]
    fn test_join_skips_empty_pages() {
        let pages = vec![
            PageText { page_number: 1, text: "One".to_string() },
            PageText { page_number: 2, text: String::new() },
            PageText { page_number: 3, text: "Three".to_string() },
        ];
        assert_eq!(join_pages(&pages), "One\nThree\n");
    }

    #[test]
    fn test_invalid_pdf_is_error() {
        let result = extract_pages(b"%PDF-1.4 truncated");
        assert!(matches!(result, Err(ExtractError::Pdf(_))));
    }

    #[test]
    fn test_utf16_strings_decode() {
        let bytes = [0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_pdf_string(&bytes), "Hi");
    }

    #[test]
    fn test_kerning_gap_inserts_space() {
        let mut text = String::new();
        let operand = Object::Array(vec![
            Object::string_literal("late"),
            Object::Integer(-250),
            Object::string_literal("fees"),
        ]);
        push_operand_text(&mut text, &operand);
        assert_eq!(text, "late fees");
    }
}
