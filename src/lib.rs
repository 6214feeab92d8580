//! # content-stack
//!
//! Command line client for the Content Stack inbox. The queue logic lives in
//! `cs-app`; this crate only loads configuration, installs logging, wires the
//! adapters and dispatches commands.

pub mod bootstrap;
pub mod cli;

use std::process::ExitCode;

use tracing::info;

use crate::bootstrap::{init_tracing_subscriber, resolve_config, wiring::build_queue};
use crate::cli::Cli;

/// Full startup sequence followed by one command.
pub async fn start(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = resolve_config(cli.config.as_deref())?;

    if let Err(err) = init_tracing_subscriber(&config.log_dir) {
        eprintln!("Failed to initialize tracing: {err:#}");
    }
    info!(version = env!("CARGO_PKG_VERSION"), "content-stack starting");

    let queue = build_queue(&config)?;
    cli::run(cli.command, queue).await
}
