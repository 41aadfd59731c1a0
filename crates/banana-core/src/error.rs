//! Error types for the client API layer.

/// Errors produced by the API client.
///
/// Validation and rejection errors are surfaced to the user at the call
/// site; [`ApiError::SessionExpired`] is the only kind that forces a
/// view transition. None of these are fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Input rejected locally. No request was issued.
    #[error("{0}")]
    Validation(String),

    /// The server declined the credentials or registration input.
    /// Carries the server's reason when the payload supplied one.
    #[error("{0}")]
    AuthRejected(String),

    /// A 401 on an authenticated call: the stored credentials are no
    /// longer valid server-side.
    #[error("session expired, please log in again")]
    SessionExpired,

    /// No response was received from the server.
    #[error("unable to reach the server: {0}")]
    NetworkUnavailable(String),

    /// A response arrived but violated the expected shape.
    #[error("unexpected response from the server: {0}")]
    InvalidResponseFormat(String),

    /// The persisted session could not be read or written.
    #[error("session storage failed: {0}")]
    Storage(String),
}

impl ApiError {
    /// Wraps a storage failure, keeping the anyhow context chain in the
    /// message.
    pub fn storage(err: anyhow::Error) -> Self {
        ApiError::Storage(format!("{err:#}"))
    }
}
