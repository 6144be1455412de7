//! Error types for the clause server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clause_engine::EngineError;
use doc_extract::ExtractError;
use remote_analyzer::RemoteError;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Session expired: {0}")]
    SessionExpired(Uuid),

    #[error("No document uploaded for this session")]
    NoDocument,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Could not decode document: {0}")]
    Decode(String),

    #[error("Keyword too short: {0:?}")]
    KeywordTooShort(String),

    #[error("{0}")]
    ClauseTooShort(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Remote analysis unavailable: set {0}")]
    MissingCredential(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ServerError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND"),
            ServerError::SessionExpired(_) => (StatusCode::GONE, "SESSION_EXPIRED"),
            ServerError::NoDocument => (StatusCode::CONFLICT, "NO_DOCUMENT"),
            ServerError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ServerError::UnsupportedFormat(_) => (StatusCode::BAD_REQUEST, "UNSUPPORTED_FORMAT"),
            ServerError::Decode(_) => (StatusCode::BAD_REQUEST, "DECODE_ERROR"),
            ServerError::KeywordTooShort(_) => (StatusCode::BAD_REQUEST, "KEYWORD_TOO_SHORT"),
            ServerError::ClauseTooShort(_) => (StatusCode::BAD_REQUEST, "CLAUSE_TOO_SHORT"),
            ServerError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            ServerError::Extraction(_) => (StatusCode::UNPROCESSABLE_ENTITY, "EXTRACTION_ERROR"),
            ServerError::MissingCredential(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "MISSING_CREDENTIAL")
            }
            ServerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ExtractError> for ServerError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedFormat(name) => ServerError::UnsupportedFormat(name),
            ExtractError::Decode(msg) => ServerError::Decode(msg),
            e @ ExtractError::FileTooLarge { .. } => ServerError::PayloadTooLarge(e.to_string()),
            other => ServerError::Extraction(other.to_string()),
        }
    }
}

impl From<EngineError> for ServerError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::KeywordTooShort(keyword) => ServerError::KeywordTooShort(keyword),
            EngineError::NoDocument => ServerError::NoDocument,
            other => ServerError::InvalidRequest(other.to_string()),
        }
    }
}

impl From<RemoteError> for ServerError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::MissingCredential(var) => ServerError::MissingCredential(var),
            RemoteError::Engine(e) => e.into(),
            e @ RemoteError::ClauseTooShort { .. } => ServerError::ClauseTooShort(e.to_string()),
            other => ServerError::Internal(other.to_string()),
        }
    }
}
