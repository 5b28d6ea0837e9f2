//! Binary crate for the `insight` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive credential configuration
//! - Themed card rendering

use clap::Parser;

mod card;
mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.init_tracing();
    cmd.run().await
}
