//! Axum route handlers for the compilation service.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::compile::{artifact_filename, content_disposition, CompileRequest, PDF_CONTENT_TYPE};
use crate::document::Layout;
use crate::errors::AppError;
use crate::state::AppState;
use crate::typeset::latex::generate_latex;
use crate::typeset::TypesetError;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LatexResponse {
    pub latex: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SectionCounts {
    pub experience: usize,
    pub bullets: usize,
    pub education: usize,
    pub skills: usize,
}

/// What the diagnostic probe gets back: enough to confirm the payload was
/// parsed the way the editor meant it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugSummary {
    pub received: bool,
    pub resume_title: String,
    pub has_name: bool,
    pub sections: SectionCounts,
    pub layout: Layout,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /compile-pdf
pub async fn handle_compile_pdf(
    State(state): State<AppState>,
    Json(request): Json<CompileRequest>,
) -> Result<Response, AppError> {
    let latex = generate_latex(&request.resume_data);
    debug!("Generated {} bytes of LaTeX", latex.len());

    let pdf = state.engine.compile(&latex).await?;
    if pdf.is_empty() {
        return Err(TypesetError::EmptyOutput.into());
    }
    let filename = artifact_filename(&request.resume_title);
    info!("Compiled '{filename}' ({} bytes)", pdf.len());

    Ok((
        [
            (header::CONTENT_TYPE, PDF_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&filename)),
        ],
        pdf,
    )
        .into_response())
}

/// POST /preview-latex
///
/// Returns the LaTeX source `/compile-pdf` would typeset.
pub async fn handle_preview_latex(Json(request): Json<CompileRequest>) -> Json<LatexResponse> {
    Json(LatexResponse {
        latex: generate_latex(&request.resume_data),
    })
}

/// POST /debug-data
pub async fn handle_debug_data(Json(request): Json<CompileRequest>) -> Json<DebugSummary> {
    Json(summarize(&request))
}

pub fn summarize(request: &CompileRequest) -> DebugSummary {
    let sections = &request.resume_data.sections;
    DebugSummary {
        received: true,
        resume_title: request.resume_title.clone(),
        has_name: !sections.personal.name.is_empty(),
        sections: SectionCounts {
            experience: sections.experience.len(),
            bullets: sections.experience.iter().map(|e| e.bullets.len()).sum(),
            education: sections.education.len(),
            skills: sections.skills.len(),
        },
        layout: request.resume_data.layout,
    }
}
