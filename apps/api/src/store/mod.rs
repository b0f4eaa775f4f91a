//! In-memory storage for query records and session statistics.
//!
//! Each map sits behind its own async `RwLock`, so mutations on one map are
//! serialized without blocking readers of the other. Nothing survives a restart.

pub mod queries;
pub mod sessions;

pub use queries::QueryStore;
pub use sessions::SessionStore;

/// The process-wide store. Constructed once in `main` and shared through `AppState`.
#[derive(Default)]
pub struct MemStore {
    pub queries: QueryStore,
    pub sessions: SessionStore,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}
