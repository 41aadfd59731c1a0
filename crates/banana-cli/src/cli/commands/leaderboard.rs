//! Leaderboard command handler.

use anyhow::Result;
use banana_core::api::{ApiClient, LeaderboardEntry};
use banana_core::config::Config;
use banana_core::session::SessionStore;
use comfy_table::{ContentArrangement, Table};

pub async fn show(config: &Config) -> Result<()> {
    let client = ApiClient::new(&config.api_base_url);
    let store = SessionStore::open_default();

    let entries = client.leaderboard(&store).await?;
    if entries.is_empty() {
        println!("The leaderboard is empty.");
    } else {
        println!("{}", render(&entries));
    }
    Ok(())
}

/// Renders the ranking in server order; rank is display-only.
pub fn render(entries: &[LeaderboardEntry]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(["#", "Player", "Score"]);
    for (index, entry) in entries.iter().enumerate() {
        table.add_row([
            (index + 1).to_string(),
            entry.username.clone(),
            entry.score.to_string(),
        ]);
    }
    table
}
