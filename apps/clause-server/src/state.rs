//! Application state for the clause server

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use clause_engine::ClauseEngine;
use doc_extract::TextExtractor;
use remote_analyzer::RemoteAnalyzer;
use shared_types::Session;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::ServerError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ClauseEngine>,
    pub extractor: Arc<TextExtractor>,
    /// None when no API key is configured
    pub remote: Option<Arc<RemoteAnalyzer>>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(
        engine: ClauseEngine,
        extractor: TextExtractor,
        remote: Option<Arc<RemoteAnalyzer>>,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            extractor: Arc::new(extractor),
            remote,
            sessions: SessionStore::default(),
        }
    }

    pub fn with_sessions(mut self, sessions: SessionStore) -> Self {
        self.sessions = sessions;
        self
    }

    pub fn remote(&self) -> Result<&RemoteAnalyzer, ServerError> {
        self.remote
            .as_deref()
            .ok_or_else(|| ServerError::MissingCredential(remote_analyzer::API_KEY_VAR.to_string()))
    }
}

/// Extractor with OCR wired in when the server is built with the `ocr` feature
pub fn build_extractor() -> TextExtractor {
    #[cfg(feature = "ocr")]
    {
        use doc_extract::ocr::{PdfiumRasterizer, TesseractOcr};
        use doc_extract::OcrFallback;

        tracing::info!("OCR fallback enabled (pdfium + tesseract)");
        TextExtractor::new().with_ocr(OcrFallback::new(
            Box::new(PdfiumRasterizer::new()),
            Box::new(TesseractOcr::default()),
        ))
    }
    #[cfg(not(feature = "ocr"))]
    {
        TextExtractor::new()
    }
}

/// Idle time after which a session and its document are dropped
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 60;

struct Entry {
    session: Session,
    expires_at: DateTime<Utc>,
}

/// In-memory sessions keyed by id.
///
/// Handlers take a copy out, run a pipeline step on it and write the result
/// back. Every access pushes the expiry forward; expired entries are purged
/// when new sessions are created. Nothing is persisted across restarts.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Entry>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn create(&self) -> Uuid {
        self.purge_expired().await;

        let id = Uuid::new_v4();
        let entry = Entry {
            session: Session::new(),
            expires_at: Utc::now() + self.ttl,
        };
        self.inner.write().await.insert(id, entry);
        id
    }

    pub async fn get(&self, id: Uuid) -> Result<Session, ServerError> {
        let mut sessions = self.inner.write().await;
        let entry = live_entry(&mut sessions, id)?;
        entry.expires_at = Utc::now() + self.ttl;
        Ok(entry.session.clone())
    }

    /// Overwrite an existing session
    pub async fn replace(&self, id: Uuid, session: Session) -> Result<(), ServerError> {
        let mut sessions = self.inner.write().await;
        let entry = live_entry(&mut sessions, id)?;
        entry.session = session;
        entry.expires_at = Utc::now() + self.ttl;
        Ok(())
    }

    /// Clear the document and all results, keeping the id
    pub async fn reset(&self, id: Uuid) -> Result<(), ServerError> {
        let session = self.get(id).await?;
        self.replace(id, session.reset()).await
    }

    /// End a session, dropping its document and results
    pub async fn remove(&self, id: Uuid) -> Result<(), ServerError> {
        self.inner
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(ServerError::SessionNotFound(id))
    }

    /// Drop every expired session; returns how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.expires_at >= now);

        let purged = before - sessions.len();
        if purged > 0 {
            debug!("Purged {} expired session(s)", purged);
        }
        purged
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(Duration::minutes(DEFAULT_SESSION_TTL_MINUTES))
    }
}

/// Entry for `id`, removing it if it has expired
fn live_entry(sessions: &mut HashMap<Uuid, Entry>, id: Uuid) -> Result<&mut Entry, ServerError> {
    // Check expiry
    let expired = match sessions.get(&id) {
        Some(entry) => entry.expires_at < Utc::now(),
        None => return Err(ServerError::SessionNotFound(id)),
    };
    if expired {
        sessions.remove(&id);
        return Err(ServerError::SessionExpired(id));
    }
    sessions
        .get_mut(&id)
        .ok_or(ServerError::SessionNotFound(id))
}
