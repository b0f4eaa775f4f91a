use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::session::SessionStats;

/// Session counters keyed by the client-chosen session id.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionStats>>,
}

impl SessionStore {
    /// Replaces the counters for a session outright and stamps the update time.
    /// Creates the session on first use.
    pub async fn upsert(
        &self,
        session_id: &str,
        queries_count: u32,
        helpful_count: u32,
    ) -> SessionStats {
        let mut sessions = self.sessions.write().await;
        let now = Utc::now();
        let stats = sessions
            .entry(session_id.to_string())
            .and_modify(|s| {
                s.queries_count = queries_count;
                s.helpful_count = helpful_count;
                s.timestamp = now;
            })
            .or_insert_with(|| SessionStats {
                session_id: session_id.to_string(),
                queries_count,
                helpful_count,
                timestamp: now,
            });
        stats.clone()
    }

    pub async fn get(&self, session_id: &str) -> Option<SessionStats> {
        self.sessions.read().await.get(session_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_session_is_none() {
        let store = SessionStore::default();
        assert!(store.get("session_new").await.is_none());
    }

    #[tokio::test]
    async fn test_upsert_creates_then_replaces() {
        let store = SessionStore::default();
        let created = store.upsert("s1", 3, 1).await;
        assert_eq!(created.queries_count, 3);
        assert_eq!(created.helpful_count, 1);

        let replaced = store.upsert("s1", 1, 0).await;
        assert_eq!(replaced.queries_count, 1);
        assert_eq!(replaced.helpful_count, 0);
        assert!(replaced.timestamp >= created.timestamp);
        assert_eq!(store.get("s1").await.unwrap(), replaced);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = SessionStore::default();
        store.upsert("a", 10, 5).await;
        store.upsert("b", 2, 2).await;
        assert_eq!(store.get("a").await.unwrap().queries_count, 10);
        assert_eq!(store.get("b").await.unwrap().helpful_count, 2);
    }

    #[tokio::test]
    async fn test_helpful_above_queries_is_stored_as_given() {
        let store = SessionStore::default();
        let stats = store.upsert("odd", 1, 4).await;
        assert_eq!(stats.helpful_count, 4);
    }
}
