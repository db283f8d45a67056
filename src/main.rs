#![deny(clippy::all)]
use anyhow::Result;
use boorumux::cli::{commands::print_sources, Cli, Commands};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    env_logger::builder().format_timestamp(None).init();

    let sources = args.load_sources()?;

    match &args.mode {
        Commands::Sources => print_sources(&sources),
        Commands::Page(cmd) => cmd.run(&sources, &args.request_token()).await?,
        Commands::Post(cmd) => cmd.run(&sources, &args.request_token()).await?,
    }

    Ok(())
}
