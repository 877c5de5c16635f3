//! echo-once: a single-shot TCP exchange demo.
//!
//! One server accepts exactly one connection and echoes the received
//! message back with a fixed prefix; one client connects, sends a message,
//! and logs the reply. The default mode launches both roles and waits for
//! them to finish; the `serve` and `send` subcommands run one role per
//! process instead.

mod client;
mod config;
mod launcher;
mod server;

use config::{Config, Role};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!(
        listen = %config.listen,
        message = %config.message,
        startup_delay_ms = config.startup_delay_ms,
        role = ?config.role,
        "Starting echo-once"
    );

    match config.role {
        Role::Run => launcher::run(&config).await?,
        Role::Serve => server::run(&config.listen).await?,
        Role::Send => {
            client::exchange_messages(&config.listen, &config.message).await?;
        }
    }

    Ok(())
}
