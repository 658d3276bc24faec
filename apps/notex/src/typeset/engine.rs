use std::io;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};

const SOURCE_FILE: &str = "resume.tex";
const OUTPUT_FILE: &str = "resume.pdf";
/// Cap on engine stderr carried into error messages.
const STDERR_LIMIT: usize = 2000;

#[derive(Debug, Error)]
pub enum TypesetError {
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] io::Error),

    #[error("failed to write LaTeX source: {0}")]
    WriteSource(#[source] io::Error),

    #[error("Tectonic not found. Please install Tectonic.")]
    EngineMissing,

    #[error("failed to run typesetting engine: {0}")]
    Spawn(#[source] io::Error),

    #[error("LaTeX compilation failed (exit {status}): {stderr}")]
    Failed { status: i32, stderr: String },

    #[error("failed to read generated PDF: {0}")]
    ReadOutput(#[source] io::Error),

    #[error("typesetting engine produced an empty PDF")]
    EmptyOutput,
}

/// Turns LaTeX source into PDF bytes. The HTTP layer only sees this trait, so
/// tests can swap in an engine that never shells out.
#[async_trait]
pub trait TypesetEngine: Send + Sync {
    async fn compile(&self, latex: &str) -> Result<Vec<u8>, TypesetError>;

    /// Whether the engine can run at all. Used by the health endpoint.
    async fn is_available(&self) -> bool;
}

/// Runs the Tectonic CLI in a scratch directory per request.
#[derive(Debug, Clone)]
pub struct TectonicEngine {
    binary: PathBuf,
}

impl TectonicEngine {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl TypesetEngine for TectonicEngine {
    async fn compile(&self, latex: &str) -> Result<Vec<u8>, TypesetError> {
        // Removed (with everything in it) when `dir` drops.
        let dir = tempfile::tempdir().map_err(TypesetError::TempDir)?;
        let source = dir.path().join(SOURCE_FILE);
        tokio::fs::write(&source, latex)
            .await
            .map_err(TypesetError::WriteSource)?;

        debug!("Running {} on {}", self.binary.display(), source.display());
        let output = Command::new(&self.binary)
            .arg(&source)
            .arg("--outdir")
            .arg(dir.path())
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => TypesetError::EngineMissing,
                _ => TypesetError::Spawn(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr: String = stderr.chars().take(STDERR_LIMIT).collect();
            warn!("Tectonic exited with {}: {stderr}", output.status);
            return Err(TypesetError::Failed {
                status: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        let pdf = tokio::fs::read(dir.path().join(OUTPUT_FILE))
            .await
            .map_err(TypesetError::ReadOutput)?;
        info!("Typeset PDF ({} bytes)", pdf.len());
        Ok(pdf)
    }

    async fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_reports_engine_missing() {
        let engine = TectonicEngine::new("/nonexistent/notex-tectonic");
        assert!(!engine.is_available().await);

        let err = engine.compile("\\documentclass{article}").await.unwrap_err();
        assert!(matches!(err, TypesetError::EngineMissing));
        assert!(err.to_string().contains("Tectonic not found"));
    }

    #[test]
    fn test_failed_message_includes_stderr() {
        let err = TypesetError::Failed {
            status: 1,
            stderr: "! Undefined control sequence.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "LaTeX compilation failed (exit 1): ! Undefined control sequence."
        );
    }
}
