//! Per-surface export lifecycle: loading, failure and the currently shown artifact.
//!
//! Compilations are not cancellable, so a slow early response can arrive
//! after a newer one. Each request takes an [`ExportTicket`]; only the result
//! for the most recent ticket is kept, and anything older is dropped (which
//! releases its artifact on the spot).

use tracing::debug;

use crate::compile::artifact::{Artifact, ArtifactStore, ArtifactUrl};
use crate::compile::client::{CompileClient, CompileError};
use crate::document::ResumeDocument;

/// Identifies one compile request issued through an [`ExportSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStatus {
    Idle,
    Loading,
    Ready,
    Failed,
}

pub struct ExportSlot {
    store: ArtifactStore,
    generation: u64,
    pending: Option<u64>,
    current: Option<ArtifactUrl>,
    error: Option<String>,
}

impl ExportSlot {
    pub fn new(store: ArtifactStore) -> Self {
        Self {
            store,
            generation: 0,
            pending: None,
            current: None,
            error: None,
        }
    }

    /// Starts a request, superseding any request still in flight.
    pub fn begin(&mut self) -> ExportTicket {
        self.generation += 1;
        self.pending = Some(self.generation);
        self.error = None;
        ExportTicket(self.generation)
    }

    /// Records the outcome of `ticket`. Returns `false` when the ticket was
    /// superseded and the outcome was discarded.
    pub fn finish(&mut self, ticket: ExportTicket, result: Result<Artifact, CompileError>) -> bool {
        if self.pending != Some(ticket.0) {
            debug!(
                "Discarding stale compile result for request {} (latest {})",
                ticket.0, self.generation
            );
            return false;
        }
        self.pending = None;

        match result {
            Ok(artifact) => {
                self.show(artifact);
            }
            Err(e) => {
                debug!("Compile request {} failed: {e}", ticket.0);
                self.fail(&e);
            }
        }
        true
    }

    /// Compiles `doc` and records the result. Holding `&mut self` across the
    /// call means no other request can supersede this one.
    pub async fn run(
        &mut self,
        client: &CompileClient,
        doc: &ResumeDocument,
        title: &str,
    ) -> Result<&ArtifactUrl, String> {
        self.begin();
        client.probe(doc, title).await;
        let result = client.compile(doc, title).await;
        self.pending = None;

        match result {
            Ok(artifact) => Ok(self.show(artifact)),
            Err(e) => Err(self.fail(&e)),
        }
    }

    fn show(&mut self, artifact: Artifact) -> &ArtifactUrl {
        self.error = None;
        // Replacing the previous reference drops it, which revokes it.
        self.current.insert(self.store.publish(artifact))
    }

    fn fail(&mut self, error: &CompileError) -> String {
        let message = error.user_message();
        self.error = Some(message.clone());
        message
    }

    pub fn status(&self) -> ExportStatus {
        if self.pending.is_some() {
            ExportStatus::Loading
        } else if self.error.is_some() {
            ExportStatus::Failed
        } else if self.current.is_some() {
            ExportStatus::Ready
        } else {
            ExportStatus::Idle
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The artifact currently on display, if any. A failed request leaves
    /// the previous artifact in place.
    pub fn artifact(&self) -> Option<&ArtifactUrl> {
        self.current.as_ref()
    }

    /// Releases the current artifact and forgets any pending request.
    pub fn clear(&mut self) {
        self.current = None;
        self.pending = None;
        self.error = None;
    }
}
