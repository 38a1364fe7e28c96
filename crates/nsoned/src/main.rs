// # nsoned - NS1 Dynamic DNS Daemon
//
// The nsoned daemon is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing logging and the runtime
// 3. Running the startup update and registering the periodic one
// 4. Staying up until SIGTERM/SIGINT
//
// ## Configuration
//
// - `NSONE_ZONE`: Zone holding the record (required)
// - `NSONE_DOMAIN`: Record name (optional, defaults to the zone)
// - `NSONE_API_KEY`: NS1 API key (required)
// - `NSONE_LOG_LEVEL`: trace, debug, info, warn or error (default info)
//
// ## Example
//
// ```bash
// export NSONE_ZONE=example.com
// export NSONE_DOMAIN=home.example.com
// export NSONE_API_KEY=...
//
// nsoned
// ```

use anyhow::{Context, Result};
use nsone_core::IntervalScheduler;
use nsoned::{DaemonConfig, Host, setup};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration error or failed startup update
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum NsonedExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<NsonedExitCode> for ExitCode {
    fn from(code: NsonedExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    let config = match DaemonConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return NsonedExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return NsonedExitCode::ConfigError.into();
    }

    info!("Starting nsoned daemon");
    info!(
        "Managing A record {} in zone {}",
        config.ddns.domain.as_deref().unwrap_or(&config.ddns.zone),
        config.ddns.zone
    );

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return NsonedExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        match run_daemon(config).await {
            Ok(code) => code,
            Err(e) => {
                error!("Daemon error: {:#}", e);
                NsonedExitCode::RuntimeError
            }
        }
    });

    result.into()
}

/// Run the daemon until a shutdown signal arrives
async fn run_daemon(config: DaemonConfig) -> Result<NsonedExitCode> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("nsoned/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let scheduler = Arc::new(IntervalScheduler::new());
    let host = Host::new(client, scheduler.clone());

    if !setup(&host, config.ddns).await {
        error!("Startup update failed, exiting");
        return Ok(NsonedExitCode::ConfigError);
    }

    info!("Daemon initialized successfully");

    let signal = wait_for_shutdown().await?;
    info!("Received shutdown signal: {}", signal);
    info!("Shutting down daemon");

    scheduler.shutdown();

    Ok(NsonedExitCode::CleanShutdown)
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
///
/// # Returns
///
/// The name of the signal received
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm =
        signal(SignalKind::terminate()).context("Failed to setup SIGTERM handler")?;
    let mut sigint =
        signal(SignalKind::interrupt()).context("Failed to setup SIGINT handler")?;

    let signal = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };

    Ok(signal)
}

/// Wait for shutdown signals (SIGINT only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .context("Failed to wait for CTRL-C")?;
    Ok("SIGINT")
}
