//! Clause analysis through a [`CompletionClient`]

use std::sync::Arc;

use clause_engine::{ClauseEngine, KeywordQuery, MIN_REMOTE_CLAUSE_CHARS};
use shared_types::{RemoteClauseReport, Session};
use tracing::{info, warn};

use crate::client::{CompletionClient, GeminiClient};
use crate::config::RemoteConfig;
use crate::error::RemoteError;
use crate::prompt::build_prompt;
use crate::reply::{decode_reply, RemoteAnalysis};

pub struct RemoteAnalyzer {
    client: Arc<dyn CompletionClient>,
}

impl RemoteAnalyzer {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Gemini-backed analyzer configured from the environment
    pub fn from_env() -> Result<Self, RemoteError> {
        Self::from_config(RemoteConfig::from_env()?)
    }

    pub fn from_config(config: RemoteConfig) -> Result<Self, RemoteError> {
        Ok(Self::new(Arc::new(GeminiClient::new(config)?)))
    }

    /// One remote round trip, with failures surfaced
    pub async fn try_analyze(&self, clause: &str) -> Result<RemoteAnalysis, RemoteError> {
        let reply = self.client.complete(&build_prompt(clause)).await?;
        decode_reply(&reply)
    }

    /// Analyze one clause; any failure yields the sentinel result
    pub async fn analyze(&self, clause: &str) -> RemoteAnalysis {
        match self.try_analyze(clause).await {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!("Remote analysis failed, using fallback: {}", e);
                RemoteAnalysis::sentinel()
            }
        }
    }

    /// Analyze every candidate sentence of a document, one call at a time
    pub async fn analyze_document(
        &self,
        engine: &ClauseEngine,
        text: &str,
        keyword: Option<&KeywordQuery>,
    ) -> Vec<RemoteClauseReport> {
        let candidates = engine.remote_candidates(text, keyword);
        info!("Sending {} clause(s) for remote analysis", candidates.len());

        let mut reports = Vec::with_capacity(candidates.len());
        for (i, clause) in candidates.into_iter().enumerate() {
            let analysis = self.analyze(&clause).await;
            reports.push(to_report(i + 1, clause, analysis));
        }
        reports
    }

    /// Analyze a single pasted clause
    pub async fn analyze_single(&self, clause: &str) -> Result<RemoteClauseReport, RemoteError> {
        let clause = clause.trim();
        let chars = clause.chars().count();
        if chars <= MIN_REMOTE_CLAUSE_CHARS {
            return Err(RemoteError::ClauseTooShort {
                chars,
                min: MIN_REMOTE_CLAUSE_CHARS,
            });
        }
        let analysis = self.analyze(clause).await;
        Ok(to_report(1, clause.to_string(), analysis))
    }

    /// Remote pass over the session's document
    pub async fn run_remote_analysis(
        &self,
        engine: &ClauseEngine,
        session: Session,
        keyword: Option<&str>,
    ) -> Result<Session, RemoteError> {
        let query = keyword
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(KeywordQuery::parse)
            .transpose()?;
        if session.document.is_none() {
            return Err(clause_engine::EngineError::NoDocument.into());
        }
        let results = self
            .analyze_document(engine, session.text(), query.as_ref())
            .await;
        Ok(session.with_remote_results(results))
    }
}

fn to_report(index: usize, original: String, analysis: RemoteAnalysis) -> RemoteClauseReport {
    RemoteClauseReport {
        index,
        original,
        risk: analysis.risk,
        simplified: analysis.simplified,
        explanation: analysis.explanation,
    }
}
