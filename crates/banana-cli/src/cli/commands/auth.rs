//! Login, registration, and logout handlers.

use anyhow::Result;
use banana_core::api::{ApiClient, LogoutMode};
use banana_core::config::Config;
use banana_core::session::SessionStore;

use super::prompt;

pub async fn login(config: &Config, username: &str) -> Result<()> {
    let client = ApiClient::new(&config.api_base_url);
    let mut store = SessionStore::open_default();

    let password = prompt("Password")?;
    let success = client.login(&mut store, username, &password).await?;

    println!("Logged in as {}.", success.username);
    Ok(())
}

pub async fn register(config: &Config, username: &str, email: &str) -> Result<()> {
    let client = ApiClient::new(&config.api_base_url);
    let mut store = SessionStore::open_default();

    let password = prompt("Password")?;
    let confirm = prompt("Confirm password")?;
    let success = client
        .register(&mut store, username, email, &password, &confirm)
        .await?;

    println!("Registered and logged in as {}.", success.username);
    Ok(())
}

/// Best-effort server invalidation; the local session is cleared no
/// matter what, so every outcome short of a storage failure exits 0.
pub async fn logout(config: &Config, all: bool) -> Result<()> {
    let client = ApiClient::new(&config.api_base_url);
    let mut store = SessionStore::open_default();

    let mode = if all { LogoutMode::All } else { LogoutMode::Standard };
    let outcome = client.logout(&mut store, mode).await?;

    match outcome.error_message() {
        Some(message) => {
            println!("Server-side logout failed: {message} Local session cleared.");
        }
        None => println!("Logged out."),
    }
    Ok(())
}
