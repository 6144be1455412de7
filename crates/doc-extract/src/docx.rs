use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

use crate::error::ExtractError;

/// Paragraph texts in document order, one per line
pub fn extract_text(data: &[u8]) -> Result<String, ExtractError> {
    if data.is_empty() {
        return Ok(String::new());
    }

    let docx = read_docx(data).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(para) => Some(
                para.children
                    .iter()
                    .filter_map(|pc| match pc {
                        ParagraphChild::Run(run) => Some(
                            run.children
                                .iter()
                                .filter_map(|rc| match rc {
                                    RunChild::Text(t) => Some(t.text.as_str()),
                                    RunChild::Tab(_) => Some("\t"),
                                    _ => None,
                                })
                                .collect::<String>(),
                        ),
                        _ => None,
                    })
                    .collect::<String>(),
            ),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}
