//! Interactive play loop.
//!
//! A thin stdin/stdout frontend over the view state machine: each
//! iteration renders the active view, reads one action, and dispatches
//! the matching event. All transition rules live in the reducer.

use anyhow::Result;
use banana_app::Runtime;
use banana_app::events::UiEvent;
use banana_app::state::{AppState, AuthMode, NoticeLevel, View};
use banana_core::api::{ApiClient, LogoutMode};
use banana_core::config::Config;

use super::{leaderboard, prompt};

pub async fn run(config: &Config) -> Result<()> {
    let mut runtime = Runtime::open_default(ApiClient::new(&config.api_base_url));

    loop {
        flush_notices(runtime.state_mut());
        if runtime.state().should_quit {
            break;
        }

        let event = match runtime.state().view {
            View::Landing => landing_prompt()?,
            View::Auth { mode } => auth_prompt(mode)?,
            View::Playing => playing_prompt(runtime.state().username.as_deref())?,
            View::Leaderboard { score } => {
                render_board(runtime.state(), score);
                board_prompt()?
            }
        };

        if let Some(event) = event {
            runtime.dispatch(event).await;
        }
    }
    Ok(())
}

fn flush_notices(state: &mut AppState) {
    for notice in state.drain_notices() {
        match notice.level {
            NoticeLevel::Info => println!("{}", notice.message),
            NoticeLevel::Error => eprintln!("{}", notice.message),
        }
    }
}

fn landing_prompt() -> Result<Option<UiEvent>> {
    let choice = prompt("[l]og in, [r]egister, [q]uit")?;
    Ok(match choice.as_str() {
        "l" => Some(UiEvent::SelectAuth(AuthMode::Login)),
        "r" => Some(UiEvent::SelectAuth(AuthMode::Register)),
        "q" => Some(UiEvent::Quit),
        _ => None,
    })
}

fn auth_prompt(mode: AuthMode) -> Result<Option<UiEvent>> {
    let username = prompt("Username (blank to go back)")?;
    if username.is_empty() {
        return Ok(Some(UiEvent::BackToLanding));
    }

    Ok(Some(match mode {
        AuthMode::Login => UiEvent::SubmitLogin {
            username,
            password: prompt("Password")?,
        },
        AuthMode::Register => UiEvent::SubmitRegister {
            username,
            email: prompt("Email")?,
            password: prompt("Password")?,
            confirm_password: prompt("Confirm password")?,
        },
    }))
}

fn playing_prompt(username: Option<&str>) -> Result<Option<UiEvent>> {
    match username {
        Some(name) => println!("Playing as {name}."),
        None => println!("Playing."),
    }

    let choice = prompt("Round score ('logout', 'logout-all', 'quit')")?;
    Ok(match choice.as_str() {
        "logout" => Some(UiEvent::LogoutRequested {
            mode: LogoutMode::Standard,
        }),
        "logout-all" => Some(UiEvent::LogoutRequested {
            mode: LogoutMode::All,
        }),
        "quit" => Some(UiEvent::Quit),
        score => match score.parse() {
            Ok(score) => Some(UiEvent::ActivityCompleted {
                score,
            }),
            Err(_) => {
                eprintln!("Enter a whole number score or a command.");
                None
            }
        },
    })
}

fn render_board(state: &AppState, score: u64) {
    println!("You scored {score}.");
    if state.entries.is_empty() {
        println!("The leaderboard is empty.");
    } else {
        println!("{}", leaderboard::render(&state.entries));
    }
}

fn board_prompt() -> Result<Option<UiEvent>> {
    let choice = prompt("[p]lay again, [f]etch again, [l]og out, [q]uit")?;
    Ok(match choice.as_str() {
        "p" => Some(UiEvent::PlayAgain),
        "f" => Some(UiEvent::LeaderboardRequested),
        "l" => Some(UiEvent::LogoutRequested {
            mode: LogoutMode::Standard,
        }),
        "q" => Some(UiEvent::Quit),
        _ => None,
    })
}
