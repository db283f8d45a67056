use std::{path::PathBuf, time::Duration};

use boorumux_extractors::prelude::*;
use clap::{Parser, Subcommand};

use self::commands::{page::PageCmd, post::PostCmd};

pub mod commands;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every configured source
    Sources,
    /// Search a source and print one page of results
    Page(PageCmd),
    /// Print a single post
    Post(PostCmd),
}

#[derive(Parser, Debug)]
#[clap(name = "boorumux", author, version, about, long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub mode: Commands,

    /// Configuration file to use
    ///
    /// Defaults to $BOORUMUX_CONFIG, or config.toml in the platform's config directory.
    /// A sample configuration is written there if the file doesn't exist.
    #[clap(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Give up on the request after this many seconds
    #[clap(
        short,
        long,
        value_name = "SECS",
        global = true,
        value_parser(clap::value_parser!(u64).range(1..))
    )]
    pub timeout: Option<u64>,
}

impl Cli {
    pub fn load_sources(&self) -> anyhow::Result<Sources> {
        let path = match &self.config {
            Some(path) => path.clone(),
            None => Config::default_path()?,
        };

        Ok(Config::load(&path)?.build()?)
    }

    /// Token for a single request: cancelled on Ctrl-C or once `--timeout` runs out.
    pub fn request_token(&self) -> CancellationToken {
        let token = CancellationToken::new();

        let interrupt = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                interrupt.cancel();
            }
        });

        match self.timeout {
            Some(secs) => cancel_after(&token, Duration::from_secs(secs)),
            None => token,
        }
    }
}
