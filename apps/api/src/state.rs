use std::sync::Arc;

use crate::assistant::gateway::CompletionGateway;
use crate::store::MemStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemStore>,
    pub gateway: Arc<CompletionGateway>,
}
