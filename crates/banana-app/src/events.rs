//! Inputs to the reducer: user actions and settled call results.

use banana_core::api::{AuthSuccess, LeaderboardEntry, LogoutMode, LogoutOutcome};
use banana_core::error::ApiError;

/// Everything that can drive a state transition.
///
/// User actions come from the frontend; `*Result` events are fed back by
/// the runtime when a network call settles.
#[derive(Debug)]
pub enum UiEvent {
    /// User picked login or register on the landing screen.
    SelectAuth(crate::state::AuthMode),
    /// User backed out of the auth screen.
    BackToLanding,
    /// Login form submitted.
    SubmitLogin { username: String, password: String },
    /// Registration form submitted.
    SubmitRegister {
        username: String,
        email: String,
        password: String,
        confirm_password: String,
    },
    /// A login/register call settled.
    AuthResult(Result<AuthSuccess, ApiError>),
    /// The activity finished with a score.
    ActivityCompleted { score: u64 },
    /// User wants another round.
    PlayAgain,
    /// User asked to log out.
    LogoutRequested { mode: LogoutMode },
    /// A logout call settled. `Err` only for a storage failure while
    /// clearing; the user is routed to landing either way.
    LogoutResult(Result<LogoutOutcome, ApiError>),
    /// Refresh the ranking for the current leaderboard view.
    LeaderboardRequested,
    /// A leaderboard fetch settled.
    LeaderboardResult(Result<Vec<LeaderboardEntry>, ApiError>),
    /// Quit the application.
    Quit,
}
