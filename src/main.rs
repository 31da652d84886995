//! filepack - bundle files into a single compressed, encoded document
//!
//! filepack:
//! - Collects files from a directory tree and/or an explicit list
//! - zlib-compresses and base64-encodes each file
//! - Serializes the identifier -> payload map as JSON
//! - base64-encodes the JSON once more for transport

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod backends;
mod cli;
mod core;
mod flows;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // stdout carries the payload only; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    cli::run(cli)
}
