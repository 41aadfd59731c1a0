//! Application state for the view state machine.
//!
//! State hierarchy:
//!
//! ```text
//! AppState
//! ├── view: View              (which screen is active — exactly one)
//! ├── username: Option<String> (remembered for greeting/ranking)
//! ├── entries: Vec<LeaderboardEntry> (last loaded ranking)
//! ├── pending: Pending        (per-operation in-flight guards)
//! └── notices: Vec<Notice>    (queued user-facing messages)
//! ```

use banana_core::api::LeaderboardEntry;
use banana_core::session::Session;

/// Which tab of the authentication screen is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

/// The active screen. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Initial screen, and the screen after logout.
    Landing,
    /// Login/registration forms.
    Auth { mode: AuthMode },
    /// The activity is running.
    Playing,
    /// The activity ended with this score.
    Leaderboard { score: u64 },
}

/// Severity of a queued notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A user-facing message queued by the reducer. The presentation layer
/// drains and displays these; the core never touches UI concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Per-operation in-flight flags.
///
/// The reducer refuses to start a second call of the same kind while one
/// is outstanding, so the no-duplicate-submission invariant holds even
/// under scripted input, not just disabled buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pending {
    pub auth: bool,
    pub logout: bool,
    pub leaderboard: bool,
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    pub view: View,
    pub username: Option<String>,
    pub entries: Vec<LeaderboardEntry>,
    pub pending: Pending,
    pub notices: Vec<Notice>,
    /// Flag indicating the app should quit.
    pub should_quit: bool,
}

impl AppState {
    /// Builds the startup state from the persisted session.
    ///
    /// A stored credential routes straight to `Playing`; a remembered
    /// username with no credential routes to `Landing` — never to
    /// `Playing`.
    pub fn at_startup(session: &Session) -> Self {
        let view = if session.is_authenticated() {
            View::Playing
        } else {
            View::Landing
        };

        Self {
            view,
            username: session.username.clone(),
            entries: Vec::new(),
            pending: Pending::default(),
            notices: Vec::new(),
            should_quit: false,
        }
    }

    /// Takes the queued notices, leaving the queue empty.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_with_credential_resumes_playing() {
        let session = Session {
            username: Some("rex".to_string()),
            access: Some("a1".to_string()),
            refresh: Some("r1".to_string()),
        };
        let state = AppState::at_startup(&session);
        assert_eq!(state.view, View::Playing);
        assert_eq!(state.username.as_deref(), Some("rex"));
    }

    #[test]
    fn startup_with_username_only_lands_on_landing() {
        let session = Session {
            username: Some("rex".to_string()),
            access: None,
            refresh: None,
        };
        let state = AppState::at_startup(&session);
        assert_eq!(state.view, View::Landing);
    }

    #[test]
    fn startup_with_refresh_token_only_still_counts() {
        let session = Session {
            username: Some("rex".to_string()),
            access: None,
            refresh: Some("r1".to_string()),
        };
        assert_eq!(AppState::at_startup(&session).view, View::Playing);
    }

    #[test]
    fn startup_with_nothing_lands_on_landing() {
        assert_eq!(AppState::at_startup(&Session::default()).view, View::Landing);
    }
}
