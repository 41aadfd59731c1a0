//! Session invalidation with a primary/fallback endpoint strategy.
//!
//! The central invariant lives here: whatever the server says — success,
//! 401, 5xx, or no response at all — the local session store is cleared
//! before `logout` returns. Stale credentials must never survive a
//! logout attempt.

use reqwest::StatusCode;
use serde_json::{Value, json};

use super::{ApiClient, error_detail};
use crate::error::ApiError;
use crate::session::{SessionStore, Storage};

/// Which sessions to invalidate server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutMode {
    /// Invalidate the current session only (`/banana/logout/`).
    Standard,
    /// Invalidate every session for the user (`/banana/logout-all/`).
    All,
}

impl LogoutMode {
    fn endpoint(self) -> &'static str {
        match self {
            LogoutMode::Standard => "logout",
            LogoutMode::All => "logout-all",
        }
    }
}

/// Result of a logout attempt. Local state is cleared in every case;
/// the variants only describe what happened server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// Server confirmed, or replied 401 — the session was already
    /// invalid, which is the desired end state.
    LoggedOut,
    /// No credentials were present; nothing to invalidate.
    AlreadyLoggedOut,
    /// Server-side invalidation failed; recoverable.
    ServerError { status: u16, message: String },
    /// The request never reached the server; recoverable.
    Network { message: String },
}

impl LogoutOutcome {
    /// Message to surface to the user when server-side invalidation
    /// could not be confirmed. `None` means a clean logout.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            LogoutOutcome::LoggedOut | LogoutOutcome::AlreadyLoggedOut => None,
            LogoutOutcome::ServerError { message, .. } | LogoutOutcome::Network { message } => {
                Some(message)
            }
        }
    }
}

impl ApiClient {
    /// Invalidates the session server-side, then clears the store.
    ///
    /// With no credentials present this is a local no-op reported as
    /// [`LogoutOutcome::AlreadyLoggedOut`]; no request is made. The only
    /// error this returns is a storage failure while clearing.
    pub async fn logout<S: Storage>(
        &self,
        store: &mut SessionStore<S>,
        mode: LogoutMode,
    ) -> Result<LogoutOutcome, ApiError> {
        let session = store.session();
        if !session.is_authenticated() {
            store.clear().map_err(ApiError::storage)?;
            return Ok(LogoutOutcome::AlreadyLoggedOut);
        }

        tracing::debug!(endpoint = mode.endpoint(), "logging out");
        let mut request = self.http.post(self.endpoint(mode.endpoint()));
        if let Some(access) = &session.access {
            request = request.bearer_auth(access);
        }
        if let Some(refresh) = &session.refresh {
            request = request.json(&json!({ "refresh": refresh }));
        }

        let outcome = match request.send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() || status == StatusCode::UNAUTHORIZED {
                    LogoutOutcome::LoggedOut
                } else {
                    let message = response
                        .json::<Value>()
                        .await
                        .ok()
                        .as_ref()
                        .and_then(error_detail)
                        .unwrap_or_else(|| "Failed to log out.".to_string());
                    tracing::warn!(status = status.as_u16(), "server-side logout failed");
                    LogoutOutcome::ServerError {
                        status: status.as_u16(),
                        message,
                    }
                }
            }
            Err(err) => {
                tracing::warn!("logout request failed: {err}");
                LogoutOutcome::Network {
                    message: err.without_url().to_string(),
                }
            }
        };

        // The client's notion of "logged out" is authoritative locally
        // even when the server call could not be confirmed.
        store.clear().map_err(ApiError::storage)?;
        Ok(outcome)
    }
}
