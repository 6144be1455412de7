//! Heuristic risk scoring
//!
//! Each sentence of a unit scores independently and the scores are summed:
//!
//! - +2 when a negation cue (`not`, `never`, `fail`) acts as a negator or
//!   adverbial modifier
//! - +3 / +2 / +1 for the first tier (high, medium, low) containing any token
//!
//! A total of 4 or more is high, 2 or more is medium, anything else is low.

use serde::Serialize;
use shared_types::{DepRole, RiskLevel, Sentence};

use crate::keywords::{tier_weight, RiskKeywordTable};

pub const NEGATION_CUES: &[&str] = &["not", "never", "fail"];
pub const NEGATION_WEIGHT: u32 = 2;
pub const HIGH_THRESHOLD: u32 = 4;
pub const MEDIUM_THRESHOLD: u32 = 2;

/// Classification result with the evidence that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub score: u32,
    pub negated: bool,
    /// Highest tier matched in any sentence
    pub matched_tier: Option<RiskLevel>,
}

pub fn level_for_score(score: u32) -> RiskLevel {
    if score >= HIGH_THRESHOLD {
        RiskLevel::High
    } else if score >= MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub struct RiskClassifier<'a> {
    table: &'a RiskKeywordTable,
}

impl<'a> RiskClassifier<'a> {
    pub fn new(table: &'a RiskKeywordTable) -> Self {
        Self { table }
    }

    pub fn classify(&self, sentences: &[Sentence]) -> RiskLevel {
        self.assess(sentences).level
    }

    pub fn assess(&self, sentences: &[Sentence]) -> RiskAssessment {
        let mut score = 0;
        let mut negated = false;
        let mut matched_tier: Option<RiskLevel> = None;

        for sentence in sentences {
            if is_negated(sentence) {
                score += NEGATION_WEIGHT;
                negated = true;
            }
            if let Some(tier) = self.sentence_tier(sentence) {
                score += tier_weight(tier);
                matched_tier = Some(matched_tier.map_or(tier, |seen| seen.max(tier)));
            }
        }

        RiskAssessment {
            level: level_for_score(score),
            score,
            negated,
            matched_tier,
        }
    }

    /// First tier, in priority order, holding any token of the sentence
    fn sentence_tier(&self, sentence: &Sentence) -> Option<RiskLevel> {
        [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low]
            .into_iter()
            .find(|&tier| {
                sentence
                    .tokens
                    .iter()
                    .any(|token| self.table.contains(tier, &token.text))
            })
    }
}

fn is_negated(sentence: &Sentence) -> bool {
    sentence.tokens.iter().any(|token| {
        NEGATION_CUES.contains(&token.text.to_lowercase().as_str())
            && matches!(token.role, DepRole::Negation | DepRole::AdverbialModifier)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{LinguisticAnalyzer, RuleBasedAnalyzer};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use shared_types::{PartOfSpeech, Token};

    fn assess(text: &str) -> RiskAssessment {
        let table = RiskKeywordTable::standard();
        let sentences = RuleBasedAnalyzer::new().analyze(text);
        RiskClassifier::new(&table).assess(&sentences)
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(level_for_score(0), RiskLevel::Low);
        assert_eq!(level_for_score(1), RiskLevel::Low);
        assert_eq!(level_for_score(2), RiskLevel::Medium);
        assert_eq!(level_for_score(3), RiskLevel::Medium);
        assert_eq!(level_for_score(4), RiskLevel::High);
        assert_eq!(level_for_score(9), RiskLevel::High);
    }

    #[test]
    fn test_single_medium_keyword_is_medium() {
        let result = assess("Disputes go to arbitration in Miami.");
        assert_eq!(result.score, 2);
        assert_eq!(result.level, RiskLevel::Medium);
        assert_eq!(result.matched_tier, Some(RiskLevel::Medium));
        assert!(!result.negated);
    }

    #[test]
    fn test_single_low_keyword_is_low() {
        let result = assess("Renewal happens each year.");
        assert_eq!(result.score, 1);
        assert_eq!(result.level, RiskLevel::Low);
    }

    #[test]
    fn test_high_keyword_with_negation_is_high() {
        let result = assess("A breach shall not be excused.");
        assert_eq!(result.score, 5);
        assert_eq!(result.level, RiskLevel::High);
        assert!(result.negated);
        assert_eq!(result.matched_tier, Some(RiskLevel::High));
    }

    #[test]
    fn test_only_first_tier_counts() {
        // breach (high) and arbitration (medium) in one sentence score 3
        let result = assess("Any breach is settled by arbitration.");
        assert_eq!(result.score, 3);
        assert_eq!(result.level, RiskLevel::Medium);
    }

    #[test]
    fn test_verb_form_of_listed_noun_is_not_a_keyword() {
        let result = assess("The Vendor shall not terminate this Agreement without 30 days notice.");
        assert_eq!(result.score, 2);
        assert_eq!(result.level, RiskLevel::Medium);
        assert_eq!(result.matched_tier, None);
    }

    #[test]
    fn test_cannot_counts_as_negation() {
        let result = assess("The Vendor cannot terminate this Agreement.");
        assert_eq!(result.score, 2);
        assert_eq!(result.level, RiskLevel::Medium);
        assert!(result.negated);
    }

    #[test]
    fn test_scores_sum_across_sentences() {
        let result = assess("Renewal is automatic.\nAny breach ends it.");
        assert_eq!(result.score, 4);
        assert_eq!(result.level, RiskLevel::High);
        assert_eq!(result.matched_tier, Some(RiskLevel::High));
    }

    #[test]
    fn test_no_evidence_is_low() {
        let result = assess("The office is on Main Street.");
        assert_eq!(result.score, 0);
        assert_eq!(result.level, RiskLevel::Low);
    }

    #[test]
    fn test_negation_cue_requires_negating_role() {
        let table = RiskKeywordTable::standard();
        let classifier = RiskClassifier::new(&table);
        let as_object = Sentence::new(
            "not",
            vec![Token::new("not", "not", PartOfSpeech::Particle).with_role(DepRole::DirectObject)],
        );
        let as_negation = Sentence::new(
            "fail",
            vec![Token::new("FAIL", "fail", PartOfSpeech::Verb).with_role(DepRole::AdverbialModifier)],
        );

        assert_eq!(classifier.assess(&[as_object]).score, 0);
        assert_eq!(classifier.assess(&[as_negation]).score, 2);
    }

    proptest! {
        #[test]
        fn classification_is_deterministic(text in "[a-zA-Z .,]{0,160}") {
            prop_assert_eq!(assess(&text), assess(&text));
        }

        #[test]
        fn score_maps_to_level(text in "(breach|not|renewal|arbitration|fee|[a-z]{1,8})( (breach|not|renewal|arbitration|fee|[a-z]{1,8})){0,12}\\.") {
            let result = assess(&text);
            prop_assert_eq!(result.level, level_for_score(result.score));
        }
    }
}
