use std::sync::Arc;

use crate::compile::CompileClient;
use crate::typeset::TypesetEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Typesets LaTeX for `/compile-pdf`. Tectonic in production.
    pub engine: Arc<dyn TypesetEngine>,
    /// Outbound bridge used by the editor's export endpoint.
    pub compiler: CompileClient,
}
