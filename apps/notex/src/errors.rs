use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::compile::CompileError;
use crate::typeset::TypesetError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The body is `{"detail": …, "code": …}`, the shape the compile client reads
/// failure messages from.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("Typeset error: {0}")]
    Typeset(#[from] TypesetError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Compile(_) => StatusCode::BAD_GATEWAY,
            AppError::Typeset(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, detail) = match &self {
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::Compile(e) => {
                tracing::error!("Compile error: {e}");
                ("COMPILE_ERROR", e.user_message())
            }
            AppError::Typeset(e) => {
                tracing::error!("Typeset error: {e}");
                let detail = match e {
                    // Engine output is what the author needs to fix the source.
                    TypesetError::EngineMissing
                    | TypesetError::Failed { .. }
                    | TypesetError::EmptyOutput => e.to_string(),
                    _ => "Error compiling PDF".to_string(),
                };
                ("TYPESET_ERROR", detail)
            }
        };

        let body = Json(json!({
            "detail": detail,
            "code": code,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_maps_to_400_with_detail() {
        let response = AppError::Validation("edits cannot be empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["detail"], "edits cannot be empty");
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_engine_failure_exposes_stderr() {
        let err = AppError::from(TypesetError::Failed {
            status: 1,
            stderr: "! Missing $ inserted.".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["detail"].as_str().unwrap().contains("Missing $ inserted"));
    }

    #[tokio::test]
    async fn test_io_failures_hide_cause() {
        let err = AppError::from(TypesetError::ReadOutput(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "/tmp/secret/resume.pdf",
        )));
        let body = body_json(err.into_response()).await;
        assert_eq!(body["detail"], "Error compiling PDF");
    }

    #[tokio::test]
    async fn test_upstream_compile_failure_is_bad_gateway() {
        let err = AppError::from(CompileError::Service {
            status: 500,
            message: "Tectonic not found".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(response).await["detail"], "Tectonic not found");
    }
}
