//! Axum route handlers for the document editing API.

use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::{default_template, ResumeDocument};
use crate::editing::ops::{apply_all, Edit};
use crate::errors::AppError;
use crate::preview::{render, VisualTree};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EditRequest {
    pub document: ResumeDocument,
    pub edits: Vec<Edit>,
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub document: ResumeDocument,
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub document: ResumeDocument,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub tree: VisualTree,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/documents/template
///
/// Returns the default template a new résumé starts from.
pub async fn handle_template() -> Json<DocumentResponse> {
    Json(DocumentResponse {
        document: default_template(),
    })
}

/// POST /api/v1/documents/edit
///
/// Applies edits in order and returns the resulting document. Stale indices
/// are ignored rather than rejected.
pub async fn handle_edit(
    Json(request): Json<EditRequest>,
) -> Result<Json<DocumentResponse>, AppError> {
    if request.edits.is_empty() {
        return Err(AppError::Validation("edits cannot be empty".to_string()));
    }
    debug!("Applying {} edit(s)", request.edits.len());

    let document = apply_all(&request.document, &request.edits);
    Ok(Json(DocumentResponse { document }))
}

/// POST /api/v1/documents/preview
///
/// Renders the document into the visual tree a preview surface draws.
pub async fn handle_preview(Json(request): Json<PreviewRequest>) -> Json<PreviewResponse> {
    Json(PreviewResponse {
        tree: render(&request.document),
    })
}
