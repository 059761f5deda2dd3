use std::sync::Arc;

use crate::dispatch::ModelSelector;
use crate::llm_client::ModelClient;
use crate::profiles::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model client handle. Swapped for a scripted client in tests.
    pub llm: Arc<dyn ModelClient>,
    /// Fixed tier order, read-only after startup.
    pub models: ModelSelector,
    pub profiles: Arc<dyn ProfileStore>,
}
