//! plume-client: command-line client for the Plume blog API.
//! List and filter survive connectivity loss through the fallback cache;
//! writes fail fast when offline.

mod args;
mod context;
mod handlers;
mod io;
mod print;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use args::{Cli, Commands};
use context::{CliError, build_ctx_from_cli};

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = build_ctx_from_cli(&cli)?;

    match cli.command {
        Commands::Posts(cmd) => handlers::posts::handle(&ctx, cmd.action).await?,
    }

    Ok(())
}
