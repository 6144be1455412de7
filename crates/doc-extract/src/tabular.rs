//! CSV flattening
//!
//! The first row is a header. Every remaining cell is read column by
//! column; empty cells are dropped and row/column positions are lost.

use csv::{ReaderBuilder, StringRecord};

use crate::error::ExtractError;

pub fn extract_text(data: &[u8]) -> Result<String, ExtractError> {
    if data.is_empty() {
        return Ok(String::new());
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let header_width = reader
        .headers()
        .map_err(|e| ExtractError::Tabular(e.to_string()))?
        .len();

    let rows: Vec<StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .map_err(|e| ExtractError::Tabular(e.to_string()))?;

    let width = rows.iter().map(|r| r.len()).max().unwrap_or(0).max(header_width);

    let mut cells = Vec::new();
    for column in 0..width {
        for row in &rows {
            match row.get(column) {
                Some(cell) if !cell.is_empty() => cells.push(cell),
                _ => {}
            }
        }
    }

    Ok(cells.join("\n"))
}
