use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of task types a prompt can be tagged with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Question,
    Summary,
    Creative,
    Advice,
}

impl TaskType {
    pub const ALL: [TaskType; 4] = [
        TaskType::Question,
        TaskType::Summary,
        TaskType::Creative,
        TaskType::Advice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Question => "question",
            TaskType::Summary => "summary",
            TaskType::Creative => "creative",
            TaskType::Advice => "advice",
        }
    }

    /// Case-sensitive lookup by wire name.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == raw)
    }

    /// Sampling temperature sent to the provider.
    pub fn temperature(&self) -> f32 {
        match self {
            TaskType::Creative => 0.8,
            _ => 0.3,
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
