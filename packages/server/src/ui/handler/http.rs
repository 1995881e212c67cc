//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use hiroba_shared::time::{get_jst_timestamp, timestamp_to_jst_rfc3339};

use crate::{infrastructure::dto::http::OnlineUsersDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get the users currently present in the channel
pub async fn get_online_users(State(state): State<Arc<AppState>>) -> Json<OnlineUsersDto> {
    let users: Vec<String> = state
        .get_online_users_usecase
        .execute()
        .into_iter()
        .map(|identity| identity.into_string())
        .collect();

    Json(OnlineUsersDto {
        count: users.len(),
        users,
        fetched_at: timestamp_to_jst_rfc3339(get_jst_timestamp()),
    })
}
