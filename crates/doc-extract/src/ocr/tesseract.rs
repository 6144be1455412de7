use tesseract::Tesseract;

use super::{OcrEngine, PageImage};
use crate::error::ExtractError;

/// English OCR through the system Tesseract library
pub struct TesseractOcr {
    language: String,
}

impl TesseractOcr {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new("eng")
    }
}

impl OcrEngine for TesseractOcr {
    fn read_lines(&self, image: &PageImage) -> Result<Vec<String>, ExtractError> {
        let text = Tesseract::new(None, Some(&self.language))
            .map_err(|e| ExtractError::Ocr(e.to_string()))?
            .set_image_from_mem(&image.png)
            .map_err(|e| ExtractError::Ocr(e.to_string()))?
            .set_source_resolution(image.dpi as i32)
            .get_text()
            .map_err(|e| ExtractError::Ocr(e.to_string()))?;

        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }
}
