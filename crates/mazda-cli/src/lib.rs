//! MyMazda CLI - remote commands for MyMazda-registered vehicles.
//!
//! Resolves credentials and the target vehicle, opens one session, runs
//! exactly one action and prints the result:
//! - `--list`: vehicles on the account
//! - `--status` (default): vehicle status
//! - `--engine start|stop`, `--doors lock|unlock`: remote controls
//! - `--poi_name/--poi_lat/--poi_long`: send a destination to navigation

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod output;
pub mod resolve;

pub use cli::Args;
pub use config::{FileConfig, ToolConfig};
pub use dispatch::execute;
pub use error::ToolError;

use mazda_sdk::MazdaClient;

/// Resolve configuration from the process environment and run one
/// invocation against the gateway, printing to stdout.
pub async fn run(args: Args) -> Result<(), ToolError> {
    let file = match args.config.clone().or_else(FileConfig::default_path) {
        Some(path) => FileConfig::load(&path)?,
        None => None,
    };
    let config = ToolConfig::resolve(&args, file.as_ref(), |key| std::env::var(key).ok())?;
    tracing::debug!(
        region = %config.region,
        api_url = %config.api_url,
        action = ?config.action,
        "resolved configuration"
    );

    let client = MazdaClient::new(config.credentials.clone(), config.region, &config.api_url)?;
    let mut stdout = std::io::stdout();
    execute(&client, &config, &mut stdout).await
}
