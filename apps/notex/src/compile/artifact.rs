//! Compiled artifacts and the revocable local references that expose them.
//!
//! An [`ArtifactUrl`] is the only way to reach a published artifact. Dropping
//! it revokes the reference, so every publication is released exactly once:
//! on replacement, on explicit clear, or when the owning surface goes away.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
const URL_PREFIX: &str = "blob:notex/";

/// A compiled document as returned by the compilation service.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub bytes: Bytes,
    pub content_type: String,
    /// Suggested download name, `"{title}.pdf"`.
    pub filename: String,
    pub compiled_at: DateTime<Utc>,
}

impl Artifact {
    pub fn pdf(bytes: Bytes, title: &str) -> Self {
        Self {
            bytes,
            content_type: PDF_CONTENT_TYPE.to_string(),
            filename: artifact_filename(title),
            compiled_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// `"{title}.pdf"`, or `"resume.pdf"` for a blank title.
pub fn artifact_filename(title: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        "resume.pdf".to_string()
    } else {
        format!("{title}.pdf")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Store
// ────────────────────────────────────────────────────────────────────────────

/// In-memory registry of published artifacts, shared by cheap clones.
#[derive(Debug, Clone, Default)]
pub struct ArtifactStore {
    inner: Arc<Mutex<HashMap<Uuid, Artifact>>>,
}

impl ArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes an artifact and returns the owning reference to it.
    pub fn publish(&self, artifact: Artifact) -> ArtifactUrl {
        let id = Uuid::new_v4();
        debug!("Publishing artifact {id} ({} bytes)", artifact.len());
        self.lock().insert(id, artifact);
        ArtifactUrl {
            id,
            url: format!("{URL_PREFIX}{id}"),
            store: self.clone(),
        }
    }

    /// Looks up a live reference by its URL string.
    pub fn resolve(&self, url: &str) -> Option<Artifact> {
        let id = url.strip_prefix(URL_PREFIX)?.parse::<Uuid>().ok()?;
        self.lock().get(&id).cloned()
    }

    /// Number of artifacts currently published.
    pub fn live_count(&self) -> usize {
        self.lock().len()
    }

    fn revoke(&self, id: Uuid) {
        if self.lock().remove(&id).is_some() {
            debug!("Revoked artifact {id}");
        }
    }

    // A panic while holding the lock cannot leave the map half-updated.
    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Artifact>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Owning handle to a published artifact. Not `Clone`: one owner, one release.
#[derive(Debug)]
pub struct ArtifactUrl {
    id: Uuid,
    url: String,
    store: ArtifactStore,
}

impl ArtifactUrl {
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// The artifact this reference points at.
    pub fn artifact(&self) -> Option<Artifact> {
        self.store.lock().get(&self.id).cloned()
    }
}

impl Drop for ArtifactUrl {
    fn drop(&mut self) {
        self.store.revoke(self.id);
    }
}
