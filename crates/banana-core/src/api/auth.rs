//! Login and registration against the banana backend.
//!
//! On success both operations persist the returned token pair and the
//! echoed username into the session store before returning; this is the
//! only path by which the session gains credentials.

use reqwest::StatusCode;
use serde_json::{Value, json};

use super::{ApiClient, error_detail, network_unavailable};
use crate::error::ApiError;
use crate::session::{SessionStore, Storage};

/// Fields checked for a server-side registration error, in the order the
/// messages are surfaced.
const REGISTER_ERROR_FIELDS: [&str; 4] = ["username", "email", "password", "confirm_password"];

/// A successful login or registration response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSuccess {
    pub username: String,
    pub access: String,
    pub refresh: String,
}

impl AuthSuccess {
    /// Parses the success body. All three fields are required and
    /// non-empty; anything else is a protocol violation.
    fn from_body(body: &Value) -> Result<Self, ApiError> {
        Ok(Self {
            username: required_field(body, "username")?,
            access: required_field(body, "access")?,
            refresh: required_field(body, "refresh")?,
        })
    }
}

impl ApiClient {
    /// Logs in with a username and password.
    ///
    /// Empty fields are rejected locally; no request is made.
    pub async fn login<S: Storage>(
        &self,
        store: &mut SessionStore<S>,
        username: &str,
        password: &str,
    ) -> Result<AuthSuccess, ApiError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ApiError::Validation("Please fill in all fields.".to_string()));
        }

        tracing::debug!(username, "logging in");
        let (status, body) = self
            .auth_request("login", &json!({ "username": username, "password": password }))
            .await?;

        if !status.is_success() {
            let message =
                error_detail(&body).unwrap_or_else(|| "Invalid username or password.".to_string());
            return Err(ApiError::AuthRejected(message));
        }

        self.store_success(store, &body).await
    }

    /// Registers a new account.
    ///
    /// All four fields are required locally. Confirmation mismatch is
    /// deliberately left to the server, which owns the password policy.
    pub async fn register<S: Storage>(
        &self,
        store: &mut SessionStore<S>,
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<AuthSuccess, ApiError> {
        if username.trim().is_empty()
            || email.trim().is_empty()
            || password.is_empty()
            || confirm_password.is_empty()
        {
            return Err(ApiError::Validation(
                "Please fill in all fields, including the password confirmation.".to_string(),
            ));
        }

        tracing::debug!(username, "registering");
        let (status, body) = self
            .auth_request(
                "register",
                &json!({
                    "username": username,
                    "email": email,
                    "password": password,
                    "confirm_password": confirm_password,
                }),
            )
            .await?;

        if !status.is_success() {
            return Err(ApiError::AuthRejected(register_rejection(&body)));
        }

        self.store_success(store, &body).await
    }

    async fn auth_request(
        &self,
        path: &str,
        payload: &Value,
    ) -> Result<(StatusCode, Value), ApiError> {
        let response = self
            .http
            .post(self.endpoint(path))
            .json(payload)
            .send()
            .await
            .map_err(network_unavailable)?;

        let status = response.status();
        let body = match response.json::<Value>().await {
            Ok(body) => body,
            Err(_) if status.is_success() => {
                return Err(ApiError::InvalidResponseFormat(format!(
                    "{path} response was not valid JSON"
                )));
            }
            // Error replies without a JSON body still carry the status.
            Err(_) => Value::Null,
        };

        Ok((status, body))
    }

    async fn store_success<S: Storage>(
        &self,
        store: &mut SessionStore<S>,
        body: &Value,
    ) -> Result<AuthSuccess, ApiError> {
        let success = AuthSuccess::from_body(body)?;
        store
            .set_tokens(&success.access, &success.refresh)
            .map_err(ApiError::storage)?;
        store
            .set_username(&success.username)
            .map_err(ApiError::storage)?;
        tracing::debug!(username = %success.username, "authenticated");
        Ok(success)
    }
}

/// Registration errors may come back as a plain `detail` string or as a
/// per-field mapping; field messages win, checked in a fixed order.
fn register_rejection(body: &Value) -> String {
    if let Some(detail) = body.get("detail") {
        for field in REGISTER_ERROR_FIELDS {
            if let Some(message) = detail
                .get(field)
                .and_then(|messages| messages.get(0))
                .and_then(Value::as_str)
            {
                return message.to_string();
            }
        }
        if let Some(message) = detail.as_str() {
            return message.to_string();
        }
    }
    "Please check your input.".to_string()
}

fn required_field(body: &Value, key: &str) -> Result<String, ApiError> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            ApiError::InvalidResponseFormat(format!("auth response is missing `{key}`"))
        })
}
