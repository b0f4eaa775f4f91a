use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::task::TaskType;

/// A completed query and the response that was returned for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryRecord {
    pub id: u64,
    pub task_type: TaskType,
    pub user_input: String,
    pub response: String,
    /// `None` until the user submits feedback.
    pub is_helpful: Option<bool>,
    pub timestamp: DateTime<Utc>,
}
