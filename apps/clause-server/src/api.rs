//! API handlers for the clause server
//!
//! Provides REST endpoints for:
//! - Session lifecycle
//! - Document upload
//! - Local and remote clause analysis

use axum::{
    extract::{DefaultBodyLimit, Path, State},
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use clause_engine::{render_markdown, render_remote_markdown};
use doc_extract::Extraction;
use serde::{Deserialize, Serialize};
use shared_types::{ClauseReport, RemoteClauseReport, Session, SourceFormat};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ServerError;
use crate::state::AppState;

/// Base64 of a maximum-size upload plus JSON framing
const MAX_REQUEST_BYTES: usize = 16 * 1024 * 1024;

/// Build the API router. Middleware is layered on by `main`.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handle_health))
        // Sessions
        .route("/api/sessions", post(handle_create_session))
        .route(
            "/api/sessions/:id",
            get(handle_get_session).delete(handle_delete_session),
        )
        .route("/api/sessions/:id/reset", post(handle_reset_session))
        .route("/api/sessions/:id/document", post(handle_upload_document))
        // Analysis
        .route("/api/sessions/:id/analyze", post(handle_analyze))
        .route("/api/sessions/:id/analyze/remote", post(handle_analyze_remote))
        .route("/api/clauses/remote", post(handle_remote_clause))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .with_state(state)
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub remote_enabled: bool,
    pub ocr_enabled: bool,
    pub sessions: usize,
}

/// Handler: GET /health
pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "clause-server",
        version: env!("CARGO_PKG_VERSION"),
        remote_enabled: state.remote.is_some(),
        ocr_enabled: state.extractor.has_ocr(),
        sessions: state.sessions.len().await,
    })
}

#[derive(Serialize)]
pub struct SessionCreatedResponse {
    pub success: bool,
    pub session_id: Uuid,
}

/// Handler: POST /api/sessions
pub async fn handle_create_session(State(state): State<AppState>) -> Json<SessionCreatedResponse> {
    let session_id = state.sessions.create().await;
    info!("Created session {}", session_id);
    Json(SessionCreatedResponse {
        success: true,
        session_id,
    })
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub session_id: Uuid,
    pub session: Session,
}

/// Handler: GET /api/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ServerError> {
    let session = state.sessions.get(id).await?;
    Ok(Json(SessionResponse {
        success: true,
        session_id: id,
        session,
    }))
}

/// Handler: DELETE /api/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionCreatedResponse>, ServerError> {
    state.sessions.remove(id).await?;
    info!("Ended session {}", id);
    Ok(Json(SessionCreatedResponse {
        success: true,
        session_id: id,
    }))
}

/// Handler: POST /api/sessions/:id/reset
pub async fn handle_reset_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionCreatedResponse>, ServerError> {
    state.sessions.reset(id).await?;
    info!("Reset session {}", id);
    Ok(Json(SessionCreatedResponse {
        success: true,
        session_id: id,
    }))
}

/// Upload request body
#[derive(Deserialize)]
pub struct UploadRequest {
    /// Original file name; its extension selects the extractor
    pub filename: String,
    /// File contents, base64 encoded
    pub data_base64: String,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub format: SourceFormat,
    #[serde(flatten)]
    pub extraction: Extraction,
}

/// Handler: POST /api/sessions/:id/document
pub async fn handle_upload_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UploadRequest>,
) -> Result<Json<UploadResponse>, ServerError> {
    let session = state.sessions.get(id).await?;

    let format = SourceFormat::from_filename(&request.filename)
        .ok_or_else(|| ServerError::UnsupportedFormat(request.filename.clone()))?;
    let data = STANDARD
        .decode(request.data_base64.trim())
        .map_err(|e| ServerError::InvalidRequest(format!("Invalid base64 data: {}", e)))?;

    debug!("Session {}: {} ({} bytes)", id, request.filename, data.len());

    // PDF parsing and OCR are CPU-bound
    let extractor = state.extractor.clone();
    let extraction = tokio::task::spawn_blocking(move || extractor.extract(&data, format))
        .await
        .map_err(|e| ServerError::Internal(format!("Extraction task failed: {}", e)))??;

    let document = extraction.clone().into_document(&request.filename, format);
    if document.is_blank() {
        warn!("Session {}: {} produced no text", id, request.filename);
    }

    let session = state.engine.load_document(session, document);
    state.sessions.replace(id, session).await?;

    Ok(Json(UploadResponse {
        success: true,
        format,
        extraction,
    }))
}

/// Local analysis request body
#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub keyword: String,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub count: usize,
    pub clauses: Vec<ClauseReport>,
    pub markdown: String,
}

/// Handler: POST /api/sessions/:id/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ServerError> {
    let session = state.sessions.get(id).await?;
    let session = state.engine.run_analysis(session, &request.keyword)?;

    let clauses = session.results.clone();
    state.sessions.replace(id, session).await?;

    Ok(Json(AnalyzeResponse {
        success: true,
        count: clauses.len(),
        markdown: render_markdown(&clauses),
        clauses,
    }))
}

/// Remote analysis request body
#[derive(Deserialize)]
pub struct RemoteAnalyzeRequest {
    /// Optional filter; blank means every candidate sentence
    #[serde(default)]
    pub keyword: Option<String>,
}

#[derive(Serialize)]
pub struct RemoteAnalyzeResponse {
    pub success: bool,
    pub count: usize,
    pub clauses: Vec<RemoteClauseReport>,
    pub markdown: String,
}

/// Handler: POST /api/sessions/:id/analyze/remote
pub async fn handle_analyze_remote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RemoteAnalyzeRequest>,
) -> Result<Json<RemoteAnalyzeResponse>, ServerError> {
    let remote = state.remote()?;
    let session = state.sessions.get(id).await?;

    let session = remote
        .run_remote_analysis(&state.engine, session, request.keyword.as_deref())
        .await?;

    let clauses = session.remote_results.clone();
    state.sessions.replace(id, session).await?;

    Ok(Json(RemoteAnalyzeResponse {
        success: true,
        count: clauses.len(),
        markdown: render_remote_markdown(&clauses),
        clauses,
    }))
}

/// Direct clause request body
#[derive(Deserialize)]
pub struct RemoteClauseRequest {
    pub clause: String,
}

/// Handler: POST /api/clauses/remote
pub async fn handle_remote_clause(
    State(state): State<AppState>,
    Json(request): Json<RemoteClauseRequest>,
) -> Result<Json<RemoteClauseReport>, ServerError> {
    let report = state.remote()?.analyze_single(&request.clause).await?;
    Ok(Json(report))
}
