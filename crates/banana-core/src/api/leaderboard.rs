//! Authenticated read of the ranked scores.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApiClient, network_unavailable};
use crate::error::ApiError;
use crate::session::{SessionStore, Storage};

/// One ranked player. Ordering is server-assigned; the client never
/// resorts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: u64,
}

impl ApiClient {
    /// Fetches the leaderboard.
    ///
    /// The access token is re-read from the store on every call rather
    /// than cached on the client, and the call fails closed with
    /// [`ApiError::SessionExpired`] — before any network I/O — when no
    /// token is present.
    pub async fn leaderboard<S: Storage>(
        &self,
        store: &SessionStore<S>,
    ) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let Some(access) = store.session().access else {
            return Err(ApiError::SessionExpired);
        };

        tracing::debug!("fetching leaderboard");
        let response = self
            .http
            .get(self.endpoint("leaderboard"))
            .bearer_auth(access)
            .send()
            .await
            .map_err(network_unavailable)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::SessionExpired);
        }
        if !status.is_success() {
            return Err(ApiError::InvalidResponseFormat(format!(
                "leaderboard request failed (HTTP {status})"
            )));
        }

        let body: Value = response.json().await.map_err(|_| {
            ApiError::InvalidResponseFormat("leaderboard response was not valid JSON".to_string())
        })?;
        if !body.is_array() {
            return Err(ApiError::InvalidResponseFormat(
                "leaderboard response was not an array".to_string(),
            ));
        }

        serde_json::from_value(body).map_err(|_| {
            ApiError::InvalidResponseFormat("leaderboard entries were malformed".to_string())
        })
    }
}
