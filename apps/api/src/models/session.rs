use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Client-reported counters for one browser session.
/// `helpful_count <= queries_count` by convention only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub session_id: String,
    pub queries_count: u32,
    pub helpful_count: u32,
    pub timestamp: DateTime<Utc>,
}
