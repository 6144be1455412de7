//! Tests for the clause server API
//!
//! Test categories:
//! - Property tests on request decoding and error mapping
//! - HTTP endpoint tests through the full router
//! - Remote endpoints against a scripted model client

#[cfg(test)]
mod property_tests {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use clause_engine::ClauseEngine;
    use doc_extract::TextExtractor;
    use proptest::prelude::*;
    use shared_types::{Session, SourceFormat};

    use crate::error::ServerError;

    proptest! {
        /// Property: any UTF-8 text uploaded as .txt comes back unchanged
        #[test]
        fn txt_upload_preserves_text(text in "\\PC{0,200}") {
            let encoded = STANDARD.encode(text.as_bytes());
            let data = STANDARD.decode(&encoded).unwrap();
            let extraction = TextExtractor::new().extract(&data, SourceFormat::Txt).unwrap();
            prop_assert_eq!(extraction.text, text);
        }

        /// Property: keywords under three characters are a client error
        #[test]
        fn short_keywords_rejected(keyword in "[a-z ]{0,2}") {
            let err = ClauseEngine::standard()
                .run_analysis(Session::new(), &keyword)
                .unwrap_err();
            prop_assert!(matches!(ServerError::from(err), ServerError::KeywordTooShort(_)));
        }

        /// Property: unknown extensions never reach an extractor
        #[test]
        fn unknown_extensions_rejected(ext in "[a-z]{1,5}".prop_filter(
            "Must not be supported",
            |e| SourceFormat::from_extension(e).is_none()
        )) {
            let name = format!("upload.{}", ext);
            prop_assert!(SourceFormat::from_filename(&name).is_none());
        }
    }
}

#[cfg(test)]
mod http_endpoint_tests {
    //! HTTP endpoint integration tests using axum-test

    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use base64::{engine::general_purpose::STANDARD, Engine};
    use clause_engine::ClauseEngine;
    use doc_extract::TextExtractor;
    use pretty_assertions::assert_eq;
    use remote_analyzer::{CompletionClient, RemoteAnalyzer, RemoteError};
    use serde_json::{json, Value};

    use crate::api::router;
    use crate::state::AppState;

    const CONTRACT: &str = "This Agreement starts on the effective date. \
        The Vendor shall not terminate this Agreement without 30 days notice. \
        Any breach is settled by arbitration.";

    const MODEL_REPLY: &str =
        r#"{"risk": "high", "simplified": "Vendor must give notice.", "explanation": "Limits termination."}"#;

    /// Model client that answers every prompt with the same text
    struct FixedReply(Result<String, String>);

    #[async_trait]
    impl CompletionClient for FixedReply {
        async fn complete(&self, _prompt: &str) -> Result<String, RemoteError> {
            self.0.clone().map_err(RemoteError::Transport)
        }
    }

    fn create_test_server(remote: Option<Arc<RemoteAnalyzer>>) -> TestServer {
        let state = AppState::new(ClauseEngine::standard(), TextExtractor::new(), remote);
        TestServer::new(router(state)).unwrap()
    }

    fn remote_with(reply: Result<&str, &str>) -> Option<Arc<RemoteAnalyzer>> {
        let client = FixedReply(reply.map(String::from).map_err(String::from));
        Some(Arc::new(RemoteAnalyzer::new(Arc::new(client))))
    }

    async fn create_session(server: &TestServer) -> String {
        let response = server.post("/api/sessions").await;
        response.assert_status_ok();
        let json = response.json::<Value>();
        json["session_id"].as_str().unwrap().to_string()
    }

    async fn upload(server: &TestServer, id: &str, filename: &str, data: &[u8]) -> Value {
        let response = server
            .post(&format!("/api/sessions/{}/document", id))
            .json(&json!({
                "filename": filename,
                "data_base64": STANDARD.encode(data),
            }))
            .await;
        response.assert_status_ok();
        response.json::<Value>()
    }

    #[tokio::test]
    async fn test_health_returns_200() {
        let server = create_test_server(None);
        let response = server.get("/health").await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "clause-server");
        assert_eq!(json["remote_enabled"], false);
    }

    #[tokio::test]
    async fn test_upload_and_analyze() {
        let server = create_test_server(None);
        let id = create_session(&server).await;

        let json = upload(&server, &id, "contract.txt", CONTRACT.as_bytes()).await;
        assert_eq!(json["format"], "txt");
        assert_eq!(json["text"], CONTRACT);
        assert_eq!(json["ocr_applied"], false);

        let response = server
            .post(&format!("/api/sessions/{}/analyze", id))
            .json(&json!({ "keyword": "terminate" }))
            .await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["count"], 1);
        let clause = &json["clauses"][0];
        assert_eq!(clause["index"], 1);
        assert_eq!(clause["risk"], "medium");
        assert_eq!(
            clause["original"],
            "The Vendor shall not terminate this Agreement without 30 days notice."
        );
        let markdown = json["markdown"].as_str().unwrap();
        assert!(markdown.starts_with("### 🧠 Analysis Results"));
        assert!(markdown.contains("`Medium`"));
    }

    #[tokio::test]
    async fn test_csv_upload() {
        let server = create_test_server(None);
        let id = create_session(&server).await;

        let csv = "clause,owner\nLate payment incurs a penalty.,Tenant\n";
        let json = upload(&server, &id, "terms.CSV", csv.as_bytes()).await;
        assert_eq!(json["format"], "csv");
        assert_eq!(json["text"], "Late payment incurs a penalty.\nTenant");
    }

    #[tokio::test]
    async fn test_no_match_renders_notice() {
        let server = create_test_server(None);
        let id = create_session(&server).await;
        upload(&server, &id, "contract.txt", CONTRACT.as_bytes()).await;

        let response = server
            .post(&format!("/api/sessions/{}/analyze", id))
            .json(&json!({ "keyword": "indemnity" }))
            .await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["count"], 0);
        assert!(json["markdown"]
            .as_str()
            .unwrap()
            .contains("No relevant clauses found for the given keyword."));
    }

    #[tokio::test]
    async fn test_analyze_before_upload_is_conflict() {
        let server = create_test_server(None);
        let id = create_session(&server).await;

        let response = server
            .post(&format!("/api/sessions/{}/analyze", id))
            .json(&json!({ "keyword": "breach" }))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(response.json::<Value>()["code"], "NO_DOCUMENT");
    }

    #[tokio::test]
    async fn test_short_keyword_rejected() {
        let server = create_test_server(None);
        let id = create_session(&server).await;
        upload(&server, &id, "contract.txt", CONTRACT.as_bytes()).await;

        let response = server
            .post(&format!("/api/sessions/{}/analyze", id))
            .json(&json!({ "keyword": " ab " }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let json = response.json::<Value>();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "KEYWORD_TOO_SHORT");
    }

    #[tokio::test]
    async fn test_upload_rejects_bad_input() {
        let server = create_test_server(None);
        let id = create_session(&server).await;
        let path = format!("/api/sessions/{}/document", id);

        let response = server
            .post(&path)
            .json(&json!({ "filename": "scan.png", "data_base64": STANDARD.encode(b"x") }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "UNSUPPORTED_FORMAT");

        let response = server
            .post(&path)
            .json(&json!({ "filename": "a.txt", "data_base64": "not base64!" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "INVALID_REQUEST");

        let response = server
            .post(&path)
            .json(&json!({ "filename": "a.txt", "data_base64": STANDARD.encode([0xC3, 0x28]) }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "DECODE_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let server = create_test_server(None);
        let missing = uuid::Uuid::new_v4();

        let response = server
            .post(&format!("/api/sessions/{}/analyze", missing))
            .json(&json!({ "keyword": "breach" }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["code"], "SESSION_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_reset_clears_document() {
        let server = create_test_server(None);
        let id = create_session(&server).await;
        upload(&server, &id, "contract.txt", CONTRACT.as_bytes()).await;

        server
            .post(&format!("/api/sessions/{}/reset", id))
            .await
            .assert_status_ok();

        let response = server.get(&format!("/api/sessions/{}", id)).await;
        response.assert_status_ok();
        let json = response.json::<Value>();
        assert!(json["session"]["document"].is_null());
        assert_eq!(json["session"]["results"], json!([]));
    }

    #[tokio::test]
    async fn test_delete_ends_session() {
        let server = create_test_server(None);
        let id = create_session(&server).await;
        upload(&server, &id, "contract.txt", CONTRACT.as_bytes()).await;
        assert_eq!(server.get("/health").await.json::<Value>()["sessions"], 1);

        server
            .delete(&format!("/api/sessions/{}", id))
            .await
            .assert_status_ok();

        assert_eq!(server.get("/health").await.json::<Value>()["sessions"], 0);
        server
            .get(&format!("/api/sessions/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .delete(&format!("/api/sessions/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_remote_without_credential_is_unavailable() {
        let server = create_test_server(None);
        let id = create_session(&server).await;

        let response = server
            .post(&format!("/api/sessions/{}/analyze/remote", id))
            .json(&json!({}))
            .await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.json::<Value>()["code"], "MISSING_CREDENTIAL");

        let response = server
            .post("/api/clauses/remote")
            .json(&json!({ "clause": "The Vendor shall not terminate this Agreement." }))
            .await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_remote_document_analysis() {
        let server = create_test_server(remote_with(Ok(MODEL_REPLY)));
        let id = create_session(&server).await;
        upload(&server, &id, "contract.txt", CONTRACT.as_bytes()).await;

        let response = server
            .post(&format!("/api/sessions/{}/analyze/remote", id))
            .json(&json!({ "keyword": "vendor" }))
            .await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["count"], 1);
        assert_eq!(json["clauses"][0]["risk"], "high");
        assert_eq!(json["clauses"][0]["simplified"], "Vendor must give notice.");
        assert!(json["markdown"].as_str().unwrap().contains("`High`"));
    }

    #[tokio::test]
    async fn test_remote_failure_reports_sentinel() {
        let server = create_test_server(remote_with(Err("connection reset")));

        let response = server
            .post("/api/clauses/remote")
            .json(&json!({ "clause": "The Vendor shall not terminate this Agreement." }))
            .await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["risk"], "unknown");
        assert_eq!(json["simplified"], "Could not simplify");
        assert_eq!(json["explanation"], "Could not explain");
    }

    #[tokio::test]
    async fn test_remote_clause_too_short() {
        let server = create_test_server(remote_with(Ok(MODEL_REPLY)));

        let response = server
            .post("/api/clauses/remote")
            .json(&json!({ "clause": "Too short." }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "CLAUSE_TOO_SHORT");
    }
}
