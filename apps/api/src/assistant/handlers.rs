//! Axum route handlers for the assistant API.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assistant::gateway::ResponseSource;
use crate::assistant::validation::validate_chat_input;
use crate::errors::AppError;
use crate::models::query::QueryRecord;
use crate::models::task::TaskType;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// `task_type` stays a string here so an unknown value is reported as a
/// field-level validation error rather than a generic body rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub input: String,
    pub task_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub id: u64,
    pub response: String,
    pub task_type: TaskType,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    /// Any integer is well-formed; ids that cannot exist are simply not found.
    pub id: i64,
    pub is_helpful: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub success: bool,
    pub is_helpful: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/ai/chat
///
/// Validates the bracket tag, gets a completion (live or demo), stores the
/// query and returns it with its id. Invalid requests never reach the provider.
pub async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload.map_err(|r| AppError::invalid_body("Invalid input format", r))?;

    // Stored input must itself start with the tag, so keep the trimmed form.
    let input = request.input.trim().to_string();
    let task_type = validate_chat_input(&input, &request.task_type)?;

    let completion = state.gateway.complete(&input, task_type).await?;
    if completion.source == ResponseSource::Demo {
        info!("Returning demo response for {task_type} request");
    }

    let record = state
        .store
        .queries
        .create(task_type, input, completion.text.clone())
        .await;

    Ok(Json(ChatResponse {
        id: record.id,
        response: completion.text,
        task_type: completion.task_type,
    }))
}

/// POST /api/ai/feedback
///
/// Marks a stored query helpful or not. Repeat submissions overwrite.
pub async fn handle_feedback(
    State(state): State<AppState>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let Json(request) =
        payload.map_err(|r| AppError::invalid_body("Invalid feedback format", r))?;

    let not_found = || AppError::NotFound("Query not found".to_string());
    let id = u64::try_from(request.id).map_err(|_| not_found())?;

    state
        .store
        .queries
        .set_feedback(id, request.is_helpful)
        .await
        .ok_or_else(not_found)?;

    Ok(Json(FeedbackResponse {
        success: true,
        is_helpful: request.is_helpful,
    }))
}

/// GET /api/ai/queries/:id
pub async fn handle_get_query(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<QueryRecord>, AppError> {
    let Path(id) = path.map_err(|r| AppError::invalid_path("Invalid query id", r))?;
    let record = state
        .store
        .queries
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound("Query not found".to_string()))?;
    Ok(Json(record))
}
