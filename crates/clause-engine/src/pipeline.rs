//! Local clause analysis pipeline

use std::sync::Arc;

use shared_types::{ClauseReport, Document, RiskLevel, Session};
use tracing::{debug, info, trace};

use crate::analyzer::{LinguisticAnalyzer, RuleBasedAnalyzer};
use crate::classifier::{RiskAssessment, RiskClassifier};
use crate::error::EngineError;
use crate::explainer;
use crate::keywords::RiskKeywordTable;
use crate::matcher::{KeywordMatcher, KeywordQuery, MatchPolicy};
use crate::segment::{self, Segmentation};
use crate::simplifier;

/// Clauses shorter than this are not worth sending to the remote model
pub const MIN_REMOTE_CLAUSE_CHARS: usize = 30;

/// ClauseEngine entry point
#[derive(Clone)]
pub struct ClauseEngine {
    table: Arc<RiskKeywordTable>,
    analyzer: Arc<dyn LinguisticAnalyzer>,
    policy: MatchPolicy,
    segmentation: Segmentation,
}

impl ClauseEngine {
    pub fn new(table: Arc<RiskKeywordTable>, analyzer: Arc<dyn LinguisticAnalyzer>) -> Self {
        Self {
            table,
            analyzer,
            policy: MatchPolicy::default(),
            segmentation: Segmentation::default(),
        }
    }

    /// Standard keyword table with the rule-based analyzer
    pub fn standard() -> Self {
        Self::new(
            Arc::new(RiskKeywordTable::standard()),
            Arc::new(RuleBasedAnalyzer::new()),
        )
    }

    pub fn with_match_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_segmentation(mut self, segmentation: Segmentation) -> Self {
        self.segmentation = segmentation;
        self
    }

    pub fn match_policy(&self) -> MatchPolicy {
        self.policy
    }

    pub fn table(&self) -> &RiskKeywordTable {
        &self.table
    }

    pub fn analyzer(&self) -> &dyn LinguisticAnalyzer {
        self.analyzer.as_ref()
    }

    pub fn segment(&self, text: &str) -> Vec<String> {
        segment::segment(text, self.segmentation, self.analyzer.as_ref())
    }

    pub fn classify(&self, unit: &str) -> RiskLevel {
        self.assess(unit).level
    }

    pub fn assess(&self, unit: &str) -> RiskAssessment {
        RiskClassifier::new(&self.table).assess(&self.analyzer.analyze(unit))
    }

    pub fn simplify(&self, unit: &str) -> String {
        simplifier::simplify(&self.analyzer.analyze(unit))
    }

    pub fn explain(&self, unit: &str) -> Vec<String> {
        explainer::explain(&self.analyzer.analyze(unit))
    }

    /// Classify, simplify and explain a single unit
    pub fn analyze_clause(&self, index: usize, unit: &str) -> ClauseReport {
        let sentences = self.analyzer.analyze(unit);
        trace!(
            "Clause {} parse: {}",
            index,
            sentences
                .iter()
                .flat_map(|s| s.tokens.iter())
                .map(|t| format!("{}/{}", t.text, t.role))
                .collect::<Vec<_>>()
                .join(" ")
        );
        let assessment = RiskClassifier::new(&self.table).assess(&sentences);
        debug!(
            "Clause {} scored {} ({})",
            index, assessment.score, assessment.level
        );

        ClauseReport {
            index,
            original: unit.trim().to_string(),
            risk: assessment.level,
            simplified: simplifier::simplify(&sentences),
            explanation: explainer::explain(&sentences),
        }
    }

    /// Segment the text and report every unit containing the keyword
    pub fn analyze_clauses(&self, text: &str, query: &KeywordQuery) -> Vec<ClauseReport> {
        let matcher = KeywordMatcher::new(query, self.policy, self.analyzer.as_ref());

        let clauses: Vec<ClauseReport> = self
            .segment(text)
            .iter()
            .filter(|unit| !unit.trim().is_empty())
            .filter(|unit| matcher.matches(unit))
            .enumerate()
            .map(|(i, unit)| self.analyze_clause(i + 1, unit))
            .collect();

        info!(
            "Keyword {:?} matched {} clause(s) ({} policy)",
            query.as_str(),
            clauses.len(),
            self.policy
        );
        clauses
    }

    /// Sentences worth a remote call: long enough, containing a verb and,
    /// when given, the keyword
    pub fn remote_candidates(&self, text: &str, keyword: Option<&KeywordQuery>) -> Vec<String> {
        self.analyzer
            .analyze(text)
            .into_iter()
            .filter(|sentence| sentence.text.trim().chars().count() > MIN_REMOTE_CLAUSE_CHARS)
            .filter(|sentence| sentence.has_verb())
            .filter(|sentence| keyword.map_or(true, |k| k.is_contained_in(&sentence.text)))
            .map(|sentence| sentence.text.trim().to_string())
            .collect()
    }

    pub fn load_document(&self, session: Session, document: Document) -> Session {
        info!(
            "Loaded {} ({} characters)",
            document.filename,
            document.text.len()
        );
        session.with_document(document)
    }

    /// Run the local pipeline on the session's document
    pub fn run_analysis(&self, session: Session, keyword: &str) -> Result<Session, EngineError> {
        let query = KeywordQuery::parse(keyword)?;
        if session.document.is_none() {
            return Err(EngineError::NoDocument);
        }
        let results = self.analyze_clauses(session.text(), &query);
        Ok(session.with_results(results))
    }
}

impl Default for ClauseEngine {
    fn default() -> Self {
        Self::standard()
    }
}
