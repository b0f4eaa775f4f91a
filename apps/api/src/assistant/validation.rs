//! Request validation for `/ai/chat`.
//!
//! An input is accepted only when the declared task type is one of the known
//! names and the trimmed input opens with the exact `[taskType]` tag.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::models::task::TaskType;

/// Leading `[tag]` plus any whitespace that follows it.
static LEADING_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\[\]]*)\]\s*").expect("leading tag pattern is valid"));

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Input cannot be empty")]
    EmptyInput,

    #[error("Invalid task type '{0}'. Expected one of: question, summary, creative, advice")]
    UnknownTaskType(String),

    #[error("Input must start with [{0}] for the selected task type")]
    MissingTag(TaskType),
}

/// Field-level detail attached to 400 responses.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl ValidationError {
    /// Schema errors name the offending field; a tag mismatch has no detail.
    pub fn details(&self) -> Vec<FieldIssue> {
        match self {
            ValidationError::EmptyInput => vec![FieldIssue::new("input", self.to_string())],
            ValidationError::UnknownTaskType(_) => {
                vec![FieldIssue::new("taskType", self.to_string())]
            }
            ValidationError::MissingTag(_) => vec![],
        }
    }
}

/// Validates a chat request and returns the parsed task type.
pub fn validate_chat_input(input: &str, task_type: &str) -> Result<TaskType, ValidationError> {
    let task = TaskType::parse(task_type)
        .ok_or_else(|| ValidationError::UnknownTaskType(task_type.to_string()))?;

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    if leading_tag(trimmed) != Some(task.as_str()) {
        return Err(ValidationError::MissingTag(task));
    }

    Ok(task)
}

/// Returns the text between the opening brackets, if the input starts with a tag.
pub fn leading_tag(input: &str) -> Option<&str> {
    LEADING_TAG
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Removes the `[taskType]` tag and the whitespace after it. Input that does
/// not start with this task's tag is returned trimmed but otherwise unchanged.
pub fn strip_task_tag(input: &str, task_type: TaskType) -> &str {
    let trimmed = input.trim();
    match LEADING_TAG.captures(trimmed) {
        Some(caps) if caps.get(1).map(|m| m.as_str()) == Some(task_type.as_str()) => {
            let end = caps.get(0).map_or(0, |m| m.end());
            trimmed[end..].trim_end()
        }
        _ => trimmed,
    }
}
