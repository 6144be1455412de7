use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RemoteConfig;
use crate::error::RemoteError;

/// Text-in, text-out access to a hosted generative model
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, RemoteError>;
}

/// Gemini `generateContent` over HTTPS
pub struct GeminiClient {
    client: Client,
    config: RemoteConfig,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, RemoteError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        debug!("POST {} ({} prompt chars)", self.config.endpoint(), prompt.len());

        let response = self
            .client
            .post(self.config.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))?;

        generated
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| RemoteError::Decode("reply has no candidate text".to_string()))
    }
}


#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::test_support::spawn_fake_gemini;
    use super::*;

    fn client_for(base_url: &str) -> GeminiClient {
        GeminiClient::new(RemoteConfig::new("test-key").with_base_url(base_url)).unwrap()
    }

    #[tokio::test]
    async fn test_reads_first_candidate_text() {
        let base_url = spawn_fake_gemini(StatusCode::OK, "{\"risk\":\"low\"}").await;
        let text = client_for(&base_url).complete("prompt").await.unwrap();
        assert_eq!(text, "{\"risk\":\"low\"}");
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let base_url = spawn_fake_gemini(StatusCode::INTERNAL_SERVER_ERROR, "ignored").await;
        let result = client_for(&base_url).complete("prompt").await;
        assert!(matches!(result, Err(RemoteError::Status { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let result = client_for("http://127.0.0.1:9").complete("prompt").await;
        assert!(matches!(result, Err(RemoteError::Transport(_))));
    }
}
