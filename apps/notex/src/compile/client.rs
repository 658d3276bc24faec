//! Compile client: the bridge between an editing surface and the external
//! compilation service.
//!
//! The client never retries. A failed call, a non-2xx status or an empty
//! 2xx body all surface as a [`CompileError`]; the caller decides whether to
//! offer a manual retry.
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::compile::artifact::Artifact;
use crate::compile::CompileRequest;
use crate::document::ResumeDocument;

pub const COMPILE_PATH: &str = "/compile-pdf";
pub const DEBUG_PATH: &str = "/debug-data";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("could not reach the compilation service: {0}")]
    Http(#[from] reqwest::Error),

    #[error("compilation failed (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("compilation service returned an empty document")]
    EmptyArtifact,
}

impl CompileError {
    /// A message suitable for showing next to a "retry" button.
    pub fn user_message(&self) -> String {
        match self {
            CompileError::Http(e) if e.is_timeout() => {
                "The compilation service took too long to respond.".to_string()
            }
            CompileError::Http(_) => {
                "Cannot connect to the compilation service. Please ensure it is running."
                    .to_string()
            }
            CompileError::Service { message, .. } => message.clone(),
            CompileError::EmptyArtifact => {
                "Received an empty PDF file from the compilation service.".to_string()
            }
        }
    }
}

/// Where the compilation service lives. Built once at startup and handed to
/// [`CompileClient::new`]; the client reads no environment of its own.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl CompilerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    detail: Option<String>,
    message: Option<String>,
}

#[derive(Clone)]
pub struct CompileClient {
    client: Client,
    base_url: String,
}

impl CompileClient {
    pub fn new(config: CompilerConfig) -> Result<Self, CompileError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends the document to the diagnostics endpoint and logs the reply.
    /// Any failure is logged and swallowed; it must never block compilation.
    pub async fn probe(&self, doc: &ResumeDocument, title: &str) {
        let body = CompileRequest {
            resume_data: doc.clone(),
            resume_title: title.to_string(),
        };
        match self
            .client
            .post(self.endpoint(DEBUG_PATH))
            .json(&body)
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => {
                let summary = resp.text().await.unwrap_or_default();
                debug!("Debug endpoint accepted request: {summary}");
            }
            Ok(resp) => warn!(
                "Debug endpoint returned {}, continuing with compilation",
                resp.status()
            ),
            Err(e) => warn!("Debug endpoint unreachable: {e}"),
        }
    }

    /// Compiles `doc` into a PDF artifact named after `title`.
    pub async fn compile(
        &self,
        doc: &ResumeDocument,
        title: &str,
    ) -> Result<Artifact, CompileError> {
        let body = CompileRequest {
            resume_data: doc.clone(),
            resume_title: title.to_string(),
        };

        let response = self
            .client
            .post(self.endpoint(COMPILE_PATH))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = extract_error_message(status.as_u16(), &text);
            warn!("Compilation service returned {status}: {message}");
            return Err(CompileError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            warn!("Compilation service returned {status} with an empty body");
            return Err(CompileError::EmptyArtifact);
        }

        info!("Compiled '{title}' ({} bytes)", bytes.len());
        Ok(Artifact::pdf(bytes, title))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Pulls a readable message out of a failure body: JSON `detail`, then JSON
/// `message`, then the raw text. An empty body falls back to the status.
pub fn extract_error_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return format!("HTTP {status}");
    }
    serde_json::from_str::<ServiceErrorBody>(body)
        .ok()
        .and_then(|e| e.detail.or(e.message))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::default_template;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn spawn(router: Router) -> CompileClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        CompileClient::new(CompilerConfig::new(format!("http://{addr}/"))).unwrap()
    }

    #[test]
    fn test_extract_error_message_detail() {
        let body = r#"{"detail": "LaTeX compilation failed: missing $"}"#;
        assert_eq!(
            extract_error_message(500, body),
            "LaTeX compilation failed: missing $"
        );
    }

    #[test]
    fn test_extract_error_message_message_field() {
        assert_eq!(extract_error_message(400, r#"{"message": "bad"}"#), "bad");
    }

    #[test]
    fn test_extract_error_message_plain_text_and_empty() {
        assert_eq!(extract_error_message(502, "Bad Gateway"), "Bad Gateway");
        assert_eq!(extract_error_message(503, r#"{"other": 1}"#), r#"{"other": 1}"#);
        assert_eq!(extract_error_message(504, "  "), "HTTP 504");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = CompileClient::new(CompilerConfig::new("http://localhost:8000/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.endpoint(COMPILE_PATH), "http://localhost:8000/compile-pdf");
    }

    #[tokio::test]
    async fn test_compile_sends_contract_body_and_returns_artifact() {
        let router = Router::new().route(
            COMPILE_PATH,
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["resumeTitle"], "Resume 1");
                assert_eq!(
                    body["resumeData"]["sections"]["experience"][0]["title"],
                    "Software Engineer"
                );
                (
                    [("content-type", "application/pdf")],
                    b"%PDF-1.5 fake".to_vec(),
                )
            }),
        );
        let client = spawn(router).await;

        let artifact = client
            .compile(&default_template(), "Resume 1")
            .await
            .unwrap();
        assert_eq!(&artifact.bytes[..], b"%PDF-1.5 fake");
        assert_eq!(artifact.filename, "Resume 1.pdf");
    }

    #[tokio::test]
    async fn test_compile_empty_body_is_error() {
        let router = Router::new().route(COMPILE_PATH, post(|| async { StatusCode::OK }));
        let client = spawn(router).await;

        let err = client.compile(&default_template(), "r").await.unwrap_err();
        assert!(matches!(err, CompileError::EmptyArtifact));
    }

    #[tokio::test]
    async fn test_compile_failure_extracts_detail() {
        let router = Router::new().route(
            COMPILE_PATH,
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "Tectonic not found"})),
                )
            }),
        );
        let client = spawn(router).await;

        let err = client.compile(&default_template(), "r").await.unwrap_err();
        match &err {
            CompileError::Service { status, message } => {
                assert_eq!(*status, 500);
                assert_eq!(message, "Tectonic not found");
            }
            other => panic!("expected Service error, got {other:?}"),
        }
        assert_eq!(err.user_message(), "Tectonic not found");
    }

    #[tokio::test]
    async fn test_compile_unreachable_is_http_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = CompileClient::new(CompilerConfig::new(format!("http://{addr}"))).unwrap();
        let err = client.compile(&default_template(), "r").await.unwrap_err();
        assert!(matches!(err, CompileError::Http(_)));
        assert!(err.user_message().contains("Cannot connect"));
    }

    #[tokio::test]
    async fn test_probe_failure_does_not_panic() {
        let router = Router::new().route(
            DEBUG_PATH,
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let client = spawn(router).await;
        client.probe(&default_template(), "r").await;
    }
}
