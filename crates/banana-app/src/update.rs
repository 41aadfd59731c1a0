//! The reducer (update function).
//!
//! All state mutations happen here. The runtime calls
//! `update(state, event)` and executes the returned effects. This is the
//! single source of truth for how events modify state.

use banana_core::error::ApiError;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, Notice, View};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns
/// effects for the runtime to execute. Events that do not apply to the
/// current view (late results, stray actions) are harmless no-ops.
pub fn update(state: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::SelectAuth(mode) => {
            if matches!(state.view, View::Landing | View::Auth { .. }) {
                state.view = View::Auth {
                    mode,
                };
            }
            vec![]
        }

        UiEvent::BackToLanding => {
            if matches!(state.view, View::Auth { .. }) {
                state.view = View::Landing;
            }
            vec![]
        }

        UiEvent::SubmitLogin { username, password } => {
            if !matches!(state.view, View::Auth { .. }) || state.pending.auth {
                return vec![];
            }
            state.pending.auth = true;
            vec![UiEffect::Login {
                username,
                password,
            }]
        }

        UiEvent::SubmitRegister {
            username,
            email,
            password,
            confirm_password,
        } => {
            if !matches!(state.view, View::Auth { .. }) || state.pending.auth {
                return vec![];
            }
            state.pending.auth = true;
            vec![UiEffect::Register {
                username,
                email,
                password,
                confirm_password,
            }]
        }

        UiEvent::AuthResult(result) => {
            state.pending.auth = false;
            match result {
                Ok(success) => {
                    // The gateway stored the credentials before this
                    // event was emitted, so the Playing guard holds.
                    if matches!(state.view, View::Auth { .. }) {
                        state.username = Some(success.username.clone());
                        state
                            .notices
                            .push(Notice::info(format!("Logged in as {}.", success.username)));
                        state.view = View::Playing;
                    }
                }
                Err(err) => {
                    state.notices.push(Notice::error(err.to_string()));
                }
            }
            vec![]
        }

        UiEvent::ActivityCompleted { score } => {
            if !matches!(state.view, View::Playing) {
                return vec![];
            }
            state.view = View::Leaderboard {
                score,
            };
            state.entries.clear();
            if state.pending.leaderboard {
                return vec![];
            }
            state.pending.leaderboard = true;
            vec![UiEffect::FetchLeaderboard]
        }

        UiEvent::PlayAgain => {
            if matches!(state.view, View::Leaderboard { .. }) {
                state.view = View::Playing;
            }
            vec![]
        }

        UiEvent::LogoutRequested { mode } => {
            if !matches!(state.view, View::Playing | View::Leaderboard { .. })
                || state.pending.logout
            {
                return vec![];
            }
            state.pending.logout = true;
            vec![UiEffect::Logout {
                mode,
            }]
        }

        UiEvent::LogoutResult(result) => {
            state.pending.logout = false;
            // Local logout is authoritative: the user lands on the
            // landing screen whatever the server said.
            state.username = None;
            state.entries.clear();
            state.view = View::Landing;
            match result {
                Ok(outcome) => {
                    if let Some(message) = outcome.error_message() {
                        state.notices.push(Notice::error(format!(
                            "Server-side logout failed: {message} You have been logged out locally."
                        )));
                    } else {
                        state.notices.push(Notice::info("Logged out."));
                    }
                }
                Err(err) => {
                    state.notices.push(Notice::error(err.to_string()));
                }
            }
            vec![]
        }

        UiEvent::LeaderboardRequested => {
            if !matches!(state.view, View::Leaderboard { .. }) || state.pending.leaderboard {
                return vec![];
            }
            state.pending.leaderboard = true;
            vec![UiEffect::FetchLeaderboard]
        }

        UiEvent::LeaderboardResult(result) => {
            state.pending.leaderboard = false;
            match result {
                Ok(entries) => {
                    // A fetch that outlived the leaderboard view is
                    // discarded.
                    if matches!(state.view, View::Leaderboard { .. }) {
                        state.entries = entries;
                    }
                    vec![]
                }
                Err(ApiError::SessionExpired) => {
                    // The only error kind that forces a transition: the
                    // stored credentials are dead, so drop them and
                    // route back to the start.
                    state.username = None;
                    state.entries.clear();
                    state.view = View::Landing;
                    state
                        .notices
                        .push(Notice::error("Session expired. Please log in again."));
                    vec![UiEffect::ClearSession]
                }
                Err(err) => {
                    state.notices.push(Notice::error(err.to_string()));
                    vec![]
                }
            }
        }

        UiEvent::Quit => {
            state.should_quit = true;
            vec![]
        }
    }
}
