//! HTTP client for the banana backend.
//!
//! All endpoints live under `{base}/banana/` and speak JSON. Each
//! operation returns a typed result; surfacing them to the user is the
//! caller's concern.

mod auth;
mod leaderboard;
mod logout;

pub use auth::AuthSuccess;
pub use leaderboard::LeaderboardEntry;
pub use logout::{LogoutMode, LogoutOutcome};

use serde_json::Value;

use crate::error::ApiError;

/// Client for the banana backend API.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client against the given base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/banana/{path}/", self.base_url)
    }
}

/// Maps a transport failure (no response received) to the typed error.
fn network_unavailable(err: reqwest::Error) -> ApiError {
    ApiError::NetworkUnavailable(err.without_url().to_string())
}

/// Pulls a human-readable message out of an error payload, if any.
/// The backend uses `detail`; `message` is accepted as a fallback.
fn error_detail(body: &Value) -> Option<String> {
    for key in ["detail", "message"] {
        if let Some(message) = body.get(key).and_then(Value::as_str) {
            return Some(message.to_string());
        }
    }
    None
}
