//! View state machine for the banana client.
//!
//! Elm-style split: a pure reducer (`update`) mutates [`state::AppState`]
//! and returns [`effects::UiEffect`] commands; the [`runtime::Runtime`]
//! executes them and feeds results back as [`events::UiEvent`]s.

pub mod effects;
pub mod events;
pub mod runtime;
pub mod state;
pub mod update;

pub use runtime::Runtime;
pub use state::{AppState, AuthMode, View};
