use image::ImageFormat;
use pdfium_render::prelude::*;

use super::{PageImage, PageRasterizer};
use crate::error::ExtractError;

/// Renders pages through the system pdfium library
pub struct PdfiumRasterizer;

impl PdfiumRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfiumRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRasterizer for PdfiumRasterizer {
    fn rasterize(
        &self,
        pdf: &[u8],
        page_number: u32,
        dpi: u32,
    ) -> Result<PageImage, ExtractError> {
        let pdfium = Pdfium::new(
            Pdfium::bind_to_system_library()
                .map_err(|e| ExtractError::Ocr(format!("pdfium bind failed: {e}")))?,
        );

        let doc = pdfium
            .load_pdf_from_byte_slice(pdf, None)
            .map_err(|e| ExtractError::Ocr(format!("pdfium open failed: {e}")))?;

        let index = page_number.saturating_sub(1) as u16;
        let page = doc
            .pages()
            .get(index)
            .map_err(|e| ExtractError::Ocr(format!("page {page_number} access failed: {e}")))?;

        let width = (page.width().value * dpi as f32 / 72.0) as i32;
        let height = (page.height().value * dpi as f32 / 72.0) as i32;

        let bitmap = page
            .render_with_config(
                &PdfRenderConfig::new()
                    .set_target_width(width)
                    .set_target_height(height),
            )
            .map_err(|e| ExtractError::Ocr(format!("render page {page_number} failed: {e}")))?;

        let mut png: Vec<u8> = Vec::new();
        bitmap
            .as_image()
            .write_to(&mut std::io::Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| ExtractError::Ocr(format!("PNG encode page {page_number} failed: {e}")))?;

        Ok(PageImage {
            page_number,
            dpi,
            width: width.max(0) as u32,
            height: height.max(0) as u32,
            png,
        })
    }
}
