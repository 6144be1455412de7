//! Subject / action / object / modifier summaries from dependency roles

use serde::Serialize;
use shared_types::{DepRole, Sentence};

/// Role-based summary of one sentence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub subject: Option<String>,
    pub action: Option<String>,
    pub object: Option<String>,
    pub modifiers: Vec<String>,
}

impl Explanation {
    /// First subject, root lemma, first object; every modifier in order.
    /// Each token fills at most one field.
    pub fn from_sentence(sentence: &Sentence) -> Self {
        let mut explanation = Explanation::default();

        for token in &sentence.tokens {
            match token.role {
                DepRole::NominalSubject => {
                    explanation.subject.get_or_insert_with(|| token.text.clone());
                }
                DepRole::Root => {
                    explanation.action.get_or_insert_with(|| token.lemma.clone());
                }
                DepRole::DirectObject | DepRole::PrepositionalObject => {
                    explanation.object.get_or_insert_with(|| token.text.clone());
                }
                DepRole::AdjectivalModifier
                | DepRole::AdverbialModifier
                | DepRole::Preposition
                | DepRole::ClausalModifier => explanation.modifiers.push(token.text.clone()),
                _ => {}
            }
        }

        explanation
    }

    pub fn is_empty(&self) -> bool {
        self.subject.is_none()
            && self.action.is_none()
            && self.object.is_none()
            && self.modifiers.is_empty()
    }

    /// `Subject: X | Action: Y | Object: Z | Modifiers: a, b`, missing fields omitted
    pub fn render(&self) -> String {
        let mut parts = Vec::new();
        if let Some(subject) = &self.subject {
            parts.push(format!("Subject: {}", subject));
        }
        if let Some(action) = &self.action {
            parts.push(format!("Action: {}", action));
        }
        if let Some(object) = &self.object {
            parts.push(format!("Object: {}", object));
        }
        if !self.modifiers.is_empty() {
            parts.push(format!("Modifiers: {}", self.modifiers.join(", ")));
        }
        parts.join(" | ")
    }
}

/// One rendered summary per sentence
pub fn explain(sentences: &[Sentence]) -> Vec<String> {
    sentences
        .iter()
        .map(|sentence| Explanation::from_sentence(sentence).render())
        .collect()
}
