//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime
//! executes. They represent I/O only (network calls, session writes);
//! the reducer itself never performs I/O, which keeps it pure and the
//! transition table testable without a server.

use banana_core::api::LogoutMode;

/// Effects returned by the reducer for the runtime to execute.
///
/// Each network effect settles as exactly one `*Result` event pushed
/// back through the runtime inbox. There is no cancellation: a result
/// arriving after the view has moved on is delivered anyway and handled
/// as a no-op by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Call the login endpoint; settles as `UiEvent::AuthResult`.
    Login { username: String, password: String },

    /// Call the registration endpoint; settles as `UiEvent::AuthResult`.
    Register {
        username: String,
        email: String,
        password: String,
        confirm_password: String,
    },

    /// Invalidate the session server-side and clear the store;
    /// settles as `UiEvent::LogoutResult`.
    Logout { mode: LogoutMode },

    /// Fetch the ranking; settles as `UiEvent::LeaderboardResult`.
    FetchLeaderboard,

    /// Clear the persisted session without a server call. Emitted on a
    /// forced expiry so stale credentials don't outlive the 401.
    ClearSession,
}
