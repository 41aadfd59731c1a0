//! CLI entry and dispatch.

use anyhow::{Context, Result};
use banana_core::config::Config;
use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "banana")]
#[command(version)]
#[command(about = "Client for the banana score service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the backend base URL from config
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in (password read from stdin)
    Login {
        #[arg(value_name = "USERNAME")]
        username: String,
    },
    /// Register a new account (passwords read from stdin)
    Register {
        #[arg(value_name = "USERNAME")]
        username: String,
        #[arg(value_name = "EMAIL")]
        email: String,
    },
    /// Log out and clear the stored session
    Logout {
        /// Invalidate every session for this account, not just this one
        #[arg(long)]
        all: bool,
    },
    /// Show the current ranking
    Leaderboard,
    /// Show who is logged in
    Status,
    /// Play a round interactively (default)
    Play,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, base_url } = cli;

    let mut config = Config::load().context("load config")?;
    if let Some(url) = base_url {
        config.api_base_url = url;
    }
    tracing::debug!(base_url = %config.api_base_url, "dispatching");

    // default to interactive play
    let command = command.unwrap_or(Commands::Play);

    match command {
        Commands::Login { username } => commands::auth::login(&config, &username).await,
        Commands::Register { username, email } => {
            commands::auth::register(&config, &username, &email).await
        }
        Commands::Logout { all } => commands::auth::logout(&config, all).await,
        Commands::Leaderboard => commands::leaderboard::show(&config).await,
        Commands::Status => commands::status::show(),
        Commands::Play => commands::play::run(&config).await,
    }
}
