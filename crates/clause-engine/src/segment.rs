//! Sentence segmentation

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analyzer::LinguisticAnalyzer;

lazy_static! {
    // Terminal punctuation followed by the whitespace run that separates sentences
    static ref SENTENCE_BREAK: Regex = Regex::new(r"[.!?]\s+").unwrap();
}

/// How clause candidates are cut out of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Segmentation {
    /// Split on whitespace after `.`, `!` or `?`
    #[default]
    Punctuation,
    /// Sentence boundaries reported by the linguistic analyzer
    Linguistic,
}

/// Split after terminal punctuation, dropping the separating whitespace.
/// The punctuation stays with the sentence it ends.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BREAK.find_iter(text) {
        // The matched punctuation is a single ASCII byte
        let end = m.start() + 1;
        sentences.push(&text[start..end]);
        start = m.end();
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }

    sentences
}

/// Segment `text` with the chosen strategy
pub fn segment(
    text: &str,
    strategy: Segmentation,
    analyzer: &dyn LinguisticAnalyzer,
) -> Vec<String> {
    match strategy {
        Segmentation::Punctuation => split_sentences(text).into_iter().map(String::from).collect(),
        Segmentation::Linguistic => analyzer.analyze(text).into_iter().map(|s| s.text).collect(),
    }
}
