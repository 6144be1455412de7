//! Text extraction for uploaded documents
//!
//! Turns PDF, DOCX, TXT and CSV uploads into one text blob. PDFs without a
//! text layer go through an optional OCR fallback.

pub mod docx;
pub mod error;
pub mod ocr;
pub mod pdf;
pub mod tabular;
pub mod text;

pub use error::ExtractError;
pub use ocr::{OcrEngine, OcrFallback, PageImage, PageRasterizer, OCR_RENDER_DPI};

use serde::Serialize;
use shared_types::{Document, SourceFormat};
use tracing::{debug, info, warn};

/// Result of one extraction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    pub text: String,
    pub page_count: Option<u32>,
    pub ocr_applied: bool,
    pub warnings: Vec<String>,
}

impl Extraction {
    fn plain(text: String) -> Self {
        Self {
            text,
            page_count: None,
            ocr_applied: false,
            warnings: Vec::new(),
        }
    }

    pub fn into_document(self, filename: impl Into<String>, format: SourceFormat) -> Document {
        let mut document = Document::new(filename, format, self.text);
        document.page_count = self.page_count;
        document.ocr_applied = self.ocr_applied;
        document
    }
}

/// Dispatches uploads to the per-format extractors
pub struct TextExtractor {
    ocr: Option<OcrFallback>,
    max_bytes: usize,
}

impl TextExtractor {
    const MAX_FILE_SIZE: usize = 10 * 1024 * 1024; // 10MB limit

    pub fn new() -> Self {
        Self {
            ocr: None,
            max_bytes: Self::MAX_FILE_SIZE,
        }
    }

    pub fn with_ocr(mut self, fallback: OcrFallback) -> Self {
        self.ocr = Some(fallback);
        self
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn has_ocr(&self) -> bool {
        self.ocr.is_some()
    }

    /// Resolve the format from the file name, then extract
    pub fn extract_named(&self, filename: &str, data: &[u8]) -> Result<Document, ExtractError> {
        let format = SourceFormat::from_filename(filename)
            .ok_or_else(|| ExtractError::UnsupportedFormat(filename.to_string()))?;
        let extraction = self.extract(data, format)?;
        Ok(extraction.into_document(filename, format))
    }

    pub fn extract(&self, data: &[u8], format: SourceFormat) -> Result<Extraction, ExtractError> {
        if data.len() > self.max_bytes {
            return Err(ExtractError::FileTooLarge {
                size: data.len(),
                limit: self.max_bytes,
            });
        }

        info!("Extracting {} bytes as {}", data.len(), format);

        let extraction = match format {
            SourceFormat::Txt => Extraction::plain(text::extract_text(data)?),
            SourceFormat::Csv => Extraction::plain(tabular::extract_text(data)?),
            SourceFormat::Docx => Extraction::plain(docx::extract_text(data)?),
            SourceFormat::Pdf => self.extract_pdf(data)?,
        };

        debug!(
            "Extracted {} characters (ocr: {})",
            extraction.text.len(),
            extraction.ocr_applied
        );
        Ok(extraction)
    }

    fn extract_pdf(&self, data: &[u8]) -> Result<Extraction, ExtractError> {
        if data.is_empty() {
            return Ok(Extraction::plain(String::new()));
        }

        let pages = pdf::extract_pages(data)?;
        let page_count = Some(pages.len() as u32);
        let text = pdf::join_pages(&pages);

        if !text.trim().is_empty() {
            return Ok(Extraction {
                text,
                page_count,
                ocr_applied: false,
                warnings: Vec::new(),
            });
        }

        warn!("No text found in PDF ({} pages), trying OCR", pages.len());
        let mut warnings = vec!["No text found in PDF. Trying OCR for scanned content.".to_string()];

        let Some(ocr) = &self.ocr else {
            warn!("OCR fallback not configured, continuing with empty text");
            warnings.push("OCR is not available; the document text is empty.".to_string());
            return Ok(Extraction {
                text,
                page_count,
                ocr_applied: false,
                warnings,
            });
        };

        let page_numbers: Vec<u32> = pages.iter().map(|p| p.page_number).collect();
        let text = ocr.recognize(data, &page_numbers)?;
        if text.trim().is_empty() {
            warnings.push("OCR found no text either.".to_string());
        }

        Ok(Extraction {
            text,
            page_count,
            ocr_applied: true,
            warnings,
        })
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::ocr::test_support::counting_fallback;
    use crate::pdf::test_support::create_test_pdf;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input_is_empty_for_every_format() {
        let extractor = TextExtractor::new();
        for format in SourceFormat::ALL {
            let extraction = extractor.extract(b"", format).unwrap();
            assert_eq!(extraction.text, "", "format {}", format);
        }
    }

    #[test]
    fn test_invalid_utf8_txt_is_decode_error() {
        let extractor = TextExtractor::new();
        let result = extractor.extract(&[0xC3, 0x28], SourceFormat::Txt);
        assert!(matches!(result, Err(ExtractError::Decode(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let extractor = TextExtractor::new();
        let result = extractor.extract_named("scan.png", b"data");
        assert!(matches!(result, Err(ExtractError::UnsupportedFormat(ref f)) if f == "scan.png"));
    }

    #[test]
    fn test_extract_named_builds_document() {
        let extractor = TextExtractor::new();
        let doc = extractor
            .extract_named("terms.TXT", b"Late fees apply.")
            .unwrap();
        assert_eq!(doc.format, SourceFormat::Txt);
        assert_eq!(doc.filename, "terms.TXT");
        assert_eq!(doc.text, "Late fees apply.");
    }

    #[test]
    fn test_size_limit() {
        let extractor = TextExtractor::new().with_max_bytes(4);
        let result = extractor.extract(b"12345", SourceFormat::Txt);
        assert!(matches!(
            result,
            Err(ExtractError::FileTooLarge { size: 5, limit: 4 })
        ));
    }

    #[test]
    fn test_text_pdf_skips_ocr() {
        let (fallback, raster_calls, ocr_calls) = counting_fallback(&["unused"]);
        let extractor = TextExtractor::new().with_ocr(fallback);
        let data = create_test_pdf(&["Indemnification survives.", "Fees are due."]);

        let extraction = extractor.extract(&data, SourceFormat::Pdf).unwrap();

        assert_eq!(extraction.text, "Indemnification survives.\nFees are due.\n");
        assert_eq!(extraction.page_count, Some(2));
        assert!(!extraction.ocr_applied);
        assert_eq!(raster_calls.load(Ordering::SeqCst), 0);
        assert_eq!(ocr_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_scanned_pdf_runs_ocr_once_per_page() {
        let (fallback, raster_calls, ocr_calls) = counting_fallback(&["Recognized line"]);
        let extractor = TextExtractor::new().with_ocr(fallback);
        let data = create_test_pdf(&["", "", ""]);

        let extraction = extractor.extract(&data, SourceFormat::Pdf).unwrap();

        assert!(extraction.ocr_applied);
        assert_eq!(raster_calls.load(Ordering::SeqCst), 3);
        assert_eq!(ocr_calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            extraction.text,
            "Recognized line (p1)\nRecognized line (p2)\nRecognized line (p3)\n"
        );
    }

    #[test]
    fn test_scanned_pdf_without_ocr_is_empty_not_error() {
        let extractor = TextExtractor::new();
        let data = create_test_pdf(&[""]);

        let extraction = extractor.extract(&data, SourceFormat::Pdf).unwrap();

        assert_eq!(extraction.text, "");
        assert!(!extraction.ocr_applied);
        assert_eq!(extraction.warnings.len(), 2);
    }

    #[test]
    fn test_ocr_yielding_nothing_proceeds() {
        let (fallback, _, ocr_calls) = counting_fallback(&[]);
        let extractor = TextExtractor::new().with_ocr(fallback);
        let data = create_test_pdf(&["", ""]);

        let extraction = extractor.extract(&data, SourceFormat::Pdf).unwrap();

        assert!(extraction.text.trim().is_empty());
        assert!(extraction.ocr_applied);
        assert_eq!(ocr_calls.load(Ordering::SeqCst), 2);
    }
}
