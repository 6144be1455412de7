//! Keyword filtering of clause candidates

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analyzer::LinguisticAnalyzer;
use crate::error::EngineError;

/// How a keyword is compared against a candidate unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Case-insensitive containment of the raw keyword
    #[default]
    Substring,
    /// Any token whose lemma equals the keyword's lemma
    Lemma,
}

impl MatchPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPolicy::Substring => "substring",
            MatchPolicy::Lemma => "lemma",
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchPolicy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "substring" => Ok(MatchPolicy::Substring),
            "lemma" => Ok(MatchPolicy::Lemma),
            other => Err(EngineError::UnknownPolicy(other.to_string())),
        }
    }
}

/// A validated keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordQuery {
    text: String,
    folded: String,
}

impl KeywordQuery {
    pub const MIN_CHARS: usize = 3;

    /// Trim and validate; two characters or fewer is rejected
    pub fn parse(raw: &str) -> Result<Self, EngineError> {
        let text = raw.trim();
        if text.chars().count() < Self::MIN_CHARS {
            return Err(EngineError::KeywordTooShort(text.to_string()));
        }
        Ok(Self {
            text: text.to_string(),
            folded: text.to_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Case-insensitive containment in `unit`
    pub fn is_contained_in(&self, unit: &str) -> bool {
        unit.to_lowercase().contains(&self.folded)
    }
}

/// Applies one [`MatchPolicy`] for the lifetime of a pipeline run
pub struct KeywordMatcher<'a> {
    query: &'a KeywordQuery,
    policy: MatchPolicy,
    analyzer: &'a dyn LinguisticAnalyzer,
    lemma: Option<String>,
}

impl<'a> KeywordMatcher<'a> {
    pub fn new(
        query: &'a KeywordQuery,
        policy: MatchPolicy,
        analyzer: &'a dyn LinguisticAnalyzer,
    ) -> Self {
        // Lemma of the query's first token, computed once
        let lemma = match policy {
            MatchPolicy::Lemma => Some(analyzer.lemma(query.as_str())),
            MatchPolicy::Substring => None,
        };
        Self {
            query,
            policy,
            analyzer,
            lemma,
        }
    }

    pub fn matches(&self, unit: &str) -> bool {
        match (self.policy, &self.lemma) {
            (MatchPolicy::Lemma, Some(lemma)) => self
                .analyzer
                .analyze(unit)
                .iter()
                .flat_map(|sentence| sentence.tokens.iter())
                .any(|token| token.lemma.to_lowercase() == *lemma),
            _ => self.query.is_contained_in(unit),
        }
    }
}
