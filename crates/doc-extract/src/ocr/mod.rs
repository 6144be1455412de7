//! OCR fallback for PDFs without a text layer
//!
//! Rendering a page and recognizing text are external concerns. This
//! module only fixes the contracts: a [`PageRasterizer`] turns one PDF page
//! into an image, an [`OcrEngine`] turns that image into text lines.

#[cfg(feature = "pdfium")]
mod pdfium;
#[cfg(feature = "tesseract")]
mod tesseract;

#[cfg(feature = "pdfium")]
pub use pdfium::PdfiumRasterizer;
#[cfg(feature = "tesseract")]
pub use tesseract::TesseractOcr;

use tracing::debug;

use crate::error::ExtractError;

/// Resolution used when rendering scanned pages for OCR
pub const OCR_RENDER_DPI: u32 = 300;

/// One rendered PDF page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    pub page_number: u32,
    pub dpi: u32,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

pub trait PageRasterizer: Send + Sync {
    /// Render `page_number` (1-based) of the PDF at `dpi`
    fn rasterize(&self, pdf: &[u8], page_number: u32, dpi: u32)
        -> Result<PageImage, ExtractError>;
}

pub trait OcrEngine: Send + Sync {
    /// Recognized line fragments, in reading order
    fn read_lines(&self, image: &PageImage) -> Result<Vec<String>, ExtractError>;
}

/// A rasterizer paired with an OCR engine
pub struct OcrFallback {
    rasterizer: Box<dyn PageRasterizer>,
    engine: Box<dyn OcrEngine>,
    dpi: u32,
}

impl OcrFallback {
    pub fn new(rasterizer: Box<dyn PageRasterizer>, engine: Box<dyn OcrEngine>) -> Self {
        Self {
            rasterizer,
            engine,
            dpi: OCR_RENDER_DPI,
        }
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// OCR every listed page once. Each page contributes its lines joined
    /// with newlines, followed by a newline.
    pub fn recognize(&self, pdf: &[u8], pages: &[u32]) -> Result<String, ExtractError> {
        let mut text = String::new();
        for &page_number in pages {
            let image = self.rasterizer.rasterize(pdf, page_number, self.dpi)?;
            let lines = self.engine.read_lines(&image)?;
            debug!("OCR page {}: {} lines", page_number, lines.len());
            text.push_str(&lines.join("\n"));
            text.push('\n');
        }
        Ok(text)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    /// Produces a blank image and records how often it was asked
    pub struct CountingRasterizer {
        pub calls: Arc<AtomicUsize>,
    }

    impl PageRasterizer for CountingRasterizer {
        fn rasterize(
            &self,
            _pdf: &[u8],
            page_number: u32,
            dpi: u32,
        ) -> Result<PageImage, ExtractError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(PageImage {
                page_number,
                dpi,
                width: 2550,
                height: 3300,
                png: Vec::new(),
            })
        }
    }

    /// Returns fixed lines per page and counts invocations
    pub struct ScriptedOcr {
        pub lines: Vec<String>,
        pub calls: Arc<AtomicUsize>,
    }

    impl OcrEngine for ScriptedOcr {
        fn read_lines(&self, image: &PageImage) -> Result<Vec<String>, ExtractError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(image.dpi, OCR_RENDER_DPI);
            Ok(self
                .lines
                .iter()
                .map(|l| format!("{} (p{})", l, image.page_number))
                .collect())
        }
    }

    pub fn counting_fallback(lines: &[&str]) -> (OcrFallback, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let raster_calls = Arc::new(AtomicUsize::new(0));
        let ocr_calls = Arc::new(AtomicUsize::new(0));
        let fallback = OcrFallback::new(
            Box::new(CountingRasterizer {
                calls: Arc::clone(&raster_calls),
            }),
            Box::new(ScriptedOcr {
                lines: lines.iter().map(|s| s.to_string()).collect(),
                calls: Arc::clone(&ocr_calls),
            }),
        );
        (fallback, raster_calls, ocr_calls)
    }
}
