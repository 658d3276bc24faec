pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::compile::handlers as export;
use crate::editing::handlers as editing;
use crate::state::AppState;
use crate::typeset::handlers as typeset;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Compilation service
        .route("/compile-pdf", post(typeset::handle_compile_pdf))
        .route("/preview-latex", post(typeset::handle_preview_latex))
        .route("/debug-data", post(typeset::handle_debug_data))
        // Editor API
        .route("/api/v1/documents/template", get(editing::handle_template))
        .route("/api/v1/documents/edit", post(editing::handle_edit))
        .route("/api/v1/documents/preview", post(editing::handle_preview))
        .route("/api/v1/documents/export", post(export::handle_export))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::compile::{CompileClient, CompileRequest};
    use crate::config::Config;
    use crate::document::default_template;
    use crate::typeset::{TypesetEngine, TypesetError};

    const FAKE_PDF: &[u8] = b"%PDF-1.5 fake";

    /// Typesets anything except a name of `\fail` (engine error) or
    /// `blank` (zero-byte output).
    struct FakeEngine;

    #[async_trait]
    impl TypesetEngine for FakeEngine {
        async fn compile(&self, latex: &str) -> Result<Vec<u8>, TypesetError> {
            if latex.contains("\\textbf{blank}") {
                return Ok(Vec::new());
            }
            if latex.contains("\\textbf{\\textbackslash{}fail}") {
                return Err(TypesetError::Failed {
                    status: 1,
                    stderr: "! Undefined control sequence.".to_string(),
                });
            }
            Ok(FAKE_PDF.to_vec())
        }

        async fn is_available(&self) -> bool {
            true
        }
    }

    fn state_with_compiler(compiler_url: String) -> AppState {
        let mut config = Config::from_lookup(|_| None).unwrap();
        config.compiler_url = compiler_url;
        AppState {
            engine: Arc::new(FakeEngine),
            compiler: CompileClient::new(config.compiler()).unwrap(),
        }
    }

    fn app() -> Router {
        build_router(state_with_compiler("http://127.0.0.1:9".to_string()))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn compile_body(title: &str) -> Value {
        serde_json::to_value(CompileRequest {
            resume_data: default_template(),
            resume_title: title.to_string(),
        })
        .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_engine() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "notex");
        assert_eq!(body["tectonicAvailable"], true);
    }

    #[tokio::test]
    async fn test_compile_pdf_returns_attachment() {
        let response = app()
            .oneshot(post_json("/compile-pdf", compile_body("Resume 1")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Resume 1.pdf\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], FAKE_PDF);
    }

    #[tokio::test]
    async fn test_compile_pdf_failure_uses_detail_body() {
        let mut body = compile_body("r");
        body["resumeData"]["sections"]["personal"]["name"] = json!("\\fail");
        let response = app().oneshot(post_json("/compile-pdf", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["code"], "TYPESET_ERROR");
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .contains("Undefined control sequence"));
    }

    #[tokio::test]
    async fn test_compile_pdf_rejects_empty_output() {
        let mut body = compile_body("r");
        body["resumeData"]["sections"]["personal"]["name"] = json!("blank");
        let response = app().oneshot(post_json("/compile-pdf", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["code"], "TYPESET_ERROR");
        assert_eq!(body["detail"], "typesetting engine produced an empty PDF");
    }

    #[tokio::test]
    async fn test_preview_latex_returns_source() {
        let response = app()
            .oneshot(post_json("/preview-latex", compile_body("r")))
            .await
            .unwrap();
        let body = json_body(response).await;
        let latex = body["latex"].as_str().unwrap();
        assert!(latex.starts_with("\\documentclass[letterpaper,11pt]{article}"));
        assert!(latex.contains("John Doe"));
    }

    #[tokio::test]
    async fn test_debug_data_summarizes_request() {
        let response = app()
            .oneshot(post_json("/debug-data", compile_body("My CV")))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["resumeTitle"], "My CV");
        assert_eq!(body["sections"]["bullets"], 3);
    }

    #[tokio::test]
    async fn test_template_endpoint() {
        let response = app()
            .oneshot(
                Request::get("/api/v1/documents/template")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["document"]["sections"]["personal"]["name"], "John Doe");
        assert_eq!(body["document"]["layout"]["fonts"]["nameSize"], 24);
    }

    #[tokio::test]
    async fn test_edit_endpoint_applies_edits_in_order() {
        let request = json!({
            "document": default_template(),
            "edits": [
                {"op": "addSkillLine", "line": "Tools: Vim"},
                {"op": "setLayoutField", "field": "nameSize", "value": "99"},
                {"op": "removeBullet", "entry": 0, "index": 7},
                {"op": "updateLayout", "patch": {"fonts": {"contentSize": "abc"}}},
            ]
        });
        let response = app()
            .oneshot(post_json("/api/v1/documents/edit", request))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let doc = &body["document"];
        assert_eq!(doc["sections"]["skills"][4], "Tools: Vim");
        assert_eq!(doc["layout"]["fonts"]["nameSize"], 32);
        assert_eq!(doc["layout"]["fonts"]["contentSize"], 11);
        assert_eq!(
            doc["sections"]["experience"][0]["bullets"]
                .as_array()
                .unwrap()
                .len(),
            3
        );
    }

    #[tokio::test]
    async fn test_edit_endpoint_rejects_empty_batch() {
        let request = json!({"document": default_template(), "edits": []});
        let response = app()
            .oneshot(post_json("/api/v1/documents/edit", request))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_preview_endpoint_returns_tree() {
        let request = json!({"document": default_template()});
        let response = app()
            .oneshot(post_json("/api/v1/documents/preview", request))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["tree"]["header"]["name"]["text"], "John Doe");
    }

    #[tokio::test]
    async fn test_export_round_trips_through_compile_service() {
        // The export endpoint calls the compile service over HTTP; point it
        // at this same router.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = build_router(state_with_compiler(format!("http://{addr}")));
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let client_router = build_router(state_with_compiler(format!("http://{addr}")));
        let response = client_router
            .oneshot(post_json("/api/v1/documents/export", compile_body("")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"resume.pdf\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], FAKE_PDF);
    }

    #[tokio::test]
    async fn test_export_unreachable_compiler_is_bad_gateway() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let response = build_router(state_with_compiler(format!("http://{addr}")))
            .oneshot(post_json("/api/v1/documents/export", compile_body("r")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        assert_eq!(body["code"], "COMPILE_ERROR");
        assert!(body["detail"].as_str().unwrap().contains("Cannot connect"));
    }
}
