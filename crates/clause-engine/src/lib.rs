pub mod analyzer;
pub mod classifier;
pub mod error;
pub mod explainer;
pub mod keywords;
pub mod lexicon;
pub mod matcher;
pub mod pipeline;
pub mod report;
pub mod segment;
pub mod simplifier;

pub use analyzer::{LinguisticAnalyzer, RuleBasedAnalyzer};
pub use classifier::{RiskAssessment, RiskClassifier};
pub use error::EngineError;
pub use explainer::Explanation;
pub use keywords::RiskKeywordTable;
pub use matcher::{KeywordMatcher, KeywordQuery, MatchPolicy};
pub use pipeline::{ClauseEngine, MIN_REMOTE_CLAUSE_CHARS};
pub use report::{render_markdown, render_remote_markdown};
pub use segment::Segmentation;
