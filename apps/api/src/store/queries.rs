use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::query::QueryRecord;
use crate::models::task::TaskType;

struct QueryTable {
    next_id: u64,
    records: HashMap<u64, QueryRecord>,
}

/// Query records keyed by a monotonically assigned id starting at 1.
pub struct QueryStore {
    table: RwLock<QueryTable>,
}

impl Default for QueryStore {
    fn default() -> Self {
        Self {
            table: RwLock::new(QueryTable {
                next_id: 1,
                records: HashMap::new(),
            }),
        }
    }
}

impl QueryStore {
    /// Stores a new record with feedback unset. The id is assigned under the
    /// write lock, so concurrent creates never share an id.
    pub async fn create(
        &self,
        task_type: TaskType,
        user_input: String,
        response: String,
    ) -> QueryRecord {
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id += 1;

        let record = QueryRecord {
            id,
            task_type,
            user_input,
            response,
            is_helpful: None,
            timestamp: Utc::now(),
        };
        table.records.insert(id, record.clone());
        debug!("Stored {task_type} query {id}");
        record
    }

    pub async fn get(&self, id: u64) -> Option<QueryRecord> {
        self.table.read().await.records.get(&id).cloned()
    }

    /// Records helpfulness feedback. Later submissions overwrite earlier ones.
    /// Returns `None` if no record has this id.
    pub async fn set_feedback(&self, id: u64, is_helpful: bool) -> Option<QueryRecord> {
        let mut table = self.table.write().await;
        let record = table.records.get_mut(&id)?;
        record.is_helpful = Some(is_helpful);
        Some(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn test_ids_start_at_one_and_increase() {
        let store = QueryStore::default();
        let a = store
            .create(TaskType::Question, "[question] a".into(), "A".into())
            .await;
        let b = store
            .create(TaskType::Advice, "[advice] b".into(), "B".into())
            .await;
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let store = QueryStore::default();
        let created = store
            .create(
                TaskType::Summary,
                "[summary] Summarize this: X".into(),
                "X, briefly.".into(),
            )
            .await;

        let fetched = store.get(created.id).await.expect("record should exist");
        assert_eq!(fetched, created);
        assert_eq!(fetched.is_helpful, None);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let store = QueryStore::default();
        assert!(store.get(42).await.is_none());
    }

    #[tokio::test]
    async fn test_feedback_overwrites() {
        let store = QueryStore::default();
        let record = store
            .create(TaskType::Creative, "[creative] robot".into(), "Beep.".into())
            .await;

        let first = store.set_feedback(record.id, true).await.unwrap();
        assert_eq!(first.is_helpful, Some(true));

        let second = store.set_feedback(record.id, false).await.unwrap();
        assert_eq!(second.is_helpful, Some(false));
        assert_eq!(store.get(record.id).await.unwrap().is_helpful, Some(false));
    }

    #[tokio::test]
    async fn test_feedback_on_unknown_id_changes_nothing() {
        let store = QueryStore::default();
        let record = store
            .create(TaskType::Question, "[question] q".into(), "a".into())
            .await;

        assert!(store.set_feedback(999_999, true).await.is_none());
        assert_eq!(store.get(record.id).await.unwrap().is_helpful, None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_distinct_ids() {
        let store = Arc::new(QueryStore::default());
        let handles: Vec<_> = (0..50)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .create(TaskType::Question, format!("[question] {i}"), "ok".into())
                        .await
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=50).collect::<Vec<u64>>());
    }
}
