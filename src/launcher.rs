//! Launcher: start the server, give it time to bind, start the client,
//! and wait for both to finish.
//!
//! The fixed startup delay is a race-prone stand-in for a readiness
//! signal: if the server takes longer than the delay to bind, the client's
//! connect fails. Kept as-is to match the demonstrated behavior; a
//! connect-retry loop or a bound-port notification would remove the race.

use std::time::Duration;
use tracing::{error, info};

use crate::client;
use crate::config::Config;
use crate::server;

/// Run server and client as two independent tasks and wait for both.
///
/// The tasks share no state and talk only over the TCP connection. Each
/// side logs its own failure; the launcher does not inspect which side
/// failed.
pub async fn run(config: &Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let listen = config.listen.clone();
    let server_task = tokio::spawn(async move {
        if let Err(e) = server::run(&listen).await {
            error!(error = %e, "Server failed");
        }
    });

    // Give the server time to bind the port before the client connects.
    tokio::time::sleep(Duration::from_millis(config.startup_delay_ms)).await;

    let addr = config.listen.clone();
    let message = config.message.clone();
    let client_task = tokio::spawn(async move {
        if let Err(e) = client::exchange_messages(&addr, &message).await {
            error!(error = %e, "Client failed");
        }
    });

    client_task.await?;
    server_task.await?;
    info!("Exchange complete");
    Ok(())
}
