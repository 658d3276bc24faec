//! Editor-facing export endpoint, backed by the compile client.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::compile::{content_disposition, CompileRequest};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/documents/export
///
/// Probes the diagnostics endpoint, then asks the configured compilation
/// service for a PDF and streams it back as a download.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(request): Json<CompileRequest>,
) -> Result<Response, AppError> {
    info!(
        "Exporting '{}' via {}",
        request.resume_title,
        state.compiler.base_url()
    );

    state
        .compiler
        .probe(&request.resume_data, &request.resume_title)
        .await;

    let artifact = state
        .compiler
        .compile(&request.resume_data, &request.resume_title)
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, artifact.content_type.clone()),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&artifact.filename),
            ),
        ],
        artifact.bytes,
    )
        .into_response())
}
