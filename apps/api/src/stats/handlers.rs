//! Axum route handlers for session statistics.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::AppError;
use crate::models::session::SessionStats;
use crate::state::AppState;
use crate::stats::success_rate;

/// Counters computed by the client. Missing or null fields count as zero.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsUpdateRequest {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub queries_count: u32,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub helpful_count: u32,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub queries_count: u32,
    pub helpful_count: u32,
    pub success_rate: u32,
}

impl StatsResponse {
    /// All zeros for a session that has never been updated.
    fn from_stats(stats: Option<&SessionStats>) -> Self {
        match stats {
            Some(s) => Self {
                queries_count: s.queries_count,
                helpful_count: s.helpful_count,
                success_rate: success_rate(s),
            },
            None => Self {
                queries_count: 0,
                helpful_count: 0,
                success_rate: 0,
            },
        }
    }
}

/// GET /api/stats/:session_id
pub async fn handle_get_stats(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<StatsResponse> {
    let stats = state.store.sessions.get(&session_id).await;
    Json(StatsResponse::from_stats(stats.as_ref()))
}

/// POST /api/stats/:session_id
///
/// Replaces the session's counters with the client's values and returns the
/// recomputed rate.
pub async fn handle_update_stats(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    payload: Result<Json<StatsUpdateRequest>, JsonRejection>,
) -> Result<Json<StatsResponse>, AppError> {
    let Json(request) = payload.map_err(|r| AppError::invalid_body("Invalid stats format", r))?;

    let stats = state
        .store
        .sessions
        .upsert(&session_id, request.queries_count, request.helpful_count)
        .await;

    Ok(Json(StatsResponse::from_stats(Some(&stats))))
}
