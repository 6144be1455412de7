use crate::error::ExtractError;

/// Strict UTF-8 decode of a plain text upload
pub fn extract_text(data: &[u8]) -> Result<String, ExtractError> {
    String::from_utf8(data.to_vec()).map_err(|e| ExtractError::Decode(e.utf8_error().to_string()))
}
