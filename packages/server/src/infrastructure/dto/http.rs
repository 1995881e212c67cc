//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// `GET /api/users` のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlineUsersDto {
    pub users: Vec<String>,
    pub count: usize,
    /// RFC 3339 (JST)
    pub fetched_at: String,
}
