//! # Runner
//!
//! Headless driver for the side-scrolling runner: loads `runner.toml`,
//! replays the scripted input and logs what happened.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("runner=info".parse()?))
        .init();

    info!("Runner starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    runner_engine::app::run()?;

    info!("Runner shutdown complete");
    Ok(())
}
