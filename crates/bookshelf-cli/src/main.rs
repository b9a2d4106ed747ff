//! bookshelf-cli: command-line client for the catalogue API.
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod client;
mod handlers;
mod print;


use clap::Parser;

use args::{Cli, Commands};
use client::{CliError, build_ctx_from_cli};
use handlers::{authors, books};

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = build_ctx_from_cli(&cli)?;

    match cli.command {
        Commands::Authors(cmd) => authors::handle(&ctx, cmd.action).await?,
        Commands::Books(cmd) => books::handle(&ctx, cmd.action).await?,
    }

    Ok(())
}
