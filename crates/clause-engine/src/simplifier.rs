use shared_types::Sentence;

/// Every token's lemma, space-joined, across all sentences of the unit
pub fn simplify(sentences: &[Sentence]) -> String {
    sentences
        .iter()
        .flat_map(|sentence| sentence.tokens.iter())
        .map(|token| token.lemma.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
