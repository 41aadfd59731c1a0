//! CLI command handlers.

pub mod auth;
pub mod leaderboard;
pub mod play;
pub mod status;

use anyhow::{Context, Result};
use std::io::Write;

/// Prompts on stdout and reads one trimmed line from stdin.
pub fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    std::io::stdout().flush().context("flush stdout")?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line).context("read input")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
