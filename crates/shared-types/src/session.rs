//! Per-user state carried between interactions
//!
//! Sessions are plain values. Each pipeline step takes a session and
//! returns the updated one; the hosting layer decides where to keep it.

use serde::{Deserialize, Serialize};

use crate::types::{ClauseReport, Document, RemoteClauseReport};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub document: Option<Document>,
    pub results: Vec<ClauseReport>,
    pub remote_results: Vec<RemoteClauseReport>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current document. Results from the previous upload are dropped.
    pub fn with_document(self, document: Document) -> Self {
        Self {
            document: Some(document),
            results: Vec::new(),
            remote_results: Vec::new(),
        }
    }

    pub fn with_results(mut self, results: Vec<ClauseReport>) -> Self {
        self.results = results;
        self
    }

    pub fn with_remote_results(mut self, results: Vec<RemoteClauseReport>) -> Self {
        self.remote_results = results;
        self
    }

    /// Document text, or "" when nothing was uploaded yet
    pub fn text(&self) -> &str {
        self.document.as_ref().map(|d| d.text.as_str()).unwrap_or("")
    }

    pub fn reset(self) -> Self {
        Self::default()
    }
}
