// Compilation bridge: packages (document, title) for the external compilation
// service, retrieves the PDF, and manages the lifecycle of the local
// references handed to the editing surface.

pub mod artifact;
pub mod client;
pub mod export;
pub mod handlers;

use serde::{Deserialize, Serialize};

use crate::document::ResumeDocument;

pub use artifact::{artifact_filename, Artifact, ArtifactStore, ArtifactUrl, PDF_CONTENT_TYPE};
pub use client::{extract_error_message, CompileClient, CompileError, CompilerConfig};
pub use export::{ExportSlot, ExportStatus, ExportTicket};

/// Body of `POST /compile-pdf` and `POST /debug-data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileRequest {
    pub resume_data: ResumeDocument,
    pub resume_title: String,
}

/// `attachment; filename="…"` with quotes and backslashes stripped from the name.
pub fn content_disposition(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .filter(|c| !matches!(c, '"' | '\\' | '\r' | '\n'))
        .collect();
    format!("attachment; filename=\"{safe}\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::default_template;

    #[test]
    fn test_compile_request_wire_names() {
        let req = CompileRequest {
            resume_data: default_template(),
            resume_title: "Resume 1".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["resumeTitle"], "Resume 1");
        assert!(json["resumeData"]["sections"].is_object());

        let back: CompileRequest = serde_json::from_value(json).unwrap();
        assert_eq!(back, req);
    }

    #[test]
    fn test_content_disposition_strips_quotes() {
        assert_eq!(
            content_disposition("My \"Best\" CV.pdf"),
            "attachment; filename=\"My Best CV.pdf\""
        );
    }
}
