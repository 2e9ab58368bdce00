//! SkyBlock stats - Main entry point.
//!
//! `sbstats <uuid> [display-name]` prints the player's stats record as JSON.
//! `sbstats --account <uuid>` prints the account summary instead. Prints
//! `null` and exits with status 1 when no record is available.

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sbstats_engine::infrastructure::config::StatsConfig;
use sbstats_engine::infrastructure::skycrypt::SkyCryptClient;
use sbstats_engine::App;

const USAGE: &str = "usage: sbstats <uuid> [display-name]\n       sbstats --account <uuid>";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Stats {
        uuid: String,
        display_name: Option<String>,
    },
    Account {
        uuid: String,
    },
}

impl Command {
    fn parse(mut args: impl Iterator<Item = String>) -> Option<Self> {
        let first = args.next()?;
        let command = if first == "--account" {
            Self::Account { uuid: args.next()? }
        } else {
            Self::Stats {
                uuid: first,
                display_name: args.next(),
            }
        };
        args.next().is_none().then_some(command)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    load_dotenv_from_repo_root();

    // Logs go to stderr; stdout carries only the JSON result.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sbstats_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(command) = Command::parse(std::env::args().skip(1)) else {
        eprintln!("{USAGE}");
        return Ok(ExitCode::from(2));
    };

    let config = StatsConfig::from_env();
    tracing::debug!(
        hypixel = %config.hypixel_base_url,
        skycrypt = %config.skycrypt_base_url,
        timeout_secs = config.timeout.as_secs(),
        "Loaded configuration"
    );
    let app = App::new(&config);
    let stats = &app.use_cases.stats;

    let output = match command {
        Command::Stats { uuid, display_name } => {
            tracing::info!(uuid = %uuid, display_name = ?display_name, "Fetching player stats");
            if let Some(name) = display_name.as_deref() {
                log_profile_page(&config, name);
            }
            stats
                .player_stats
                .execute(&uuid, display_name.as_deref())
                .await
                .map(|record| serde_json::to_value(&record))
                .transpose()?
        }
        Command::Account { uuid } => {
            tracing::info!(uuid = %uuid, "Fetching player account");
            stats
                .player_account
                .execute(&uuid)
                .await
                .map(|account| serde_json::to_value(&account))
                .transpose()?
        }
    };

    match output {
        Some(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("null");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Points the operator at the aggregator's public page for the same player.
fn log_profile_page(config: &StatsConfig, display_name: &str) {
    match SkyCryptClient::from_config(config).profile_page_url(display_name) {
        Ok(url) => tracing::info!(%url, "Aggregator profile page"),
        Err(e) => tracing::debug!(error = %e, "No aggregator profile page"),
    }
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides, then fall back to the working directory.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
    let _ = dotenvy::dotenv();
}
