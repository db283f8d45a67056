use boorumux_common::log::debug;
use boorumux_extractors::prelude::*;
use clap::Args;
use owo_colors::OwoColorize;

use super::{find_source, post_line};

#[derive(Debug, Args)]
pub struct PageCmd {
    /// Source to search, as named in the configuration
    pub source: String,

    /// Tags to search for. Prefix a tag with '-' to exclude it
    #[clap(value_name = "TAGS", allow_hyphen_values = true)]
    pub tags: Vec<String>,

    /// Page to fetch, counting from 0
    #[clap(short, long, value_name = "NUMBER", default_value_t = 0)]
    pub page: u32,

    /// Show blacklisted posts too
    #[clap(long)]
    pub no_blacklist: bool,
}

impl PageCmd {
    pub async fn run(&self, sources: &Sources, cancel: &CancellationToken) -> anyhow::Result<()> {
        let booru = find_source(sources, &self.source)?;
        let query = Query::new(&self.tags);

        debug!("Searching {} for {:?}, page {}", self.source, query.tags, self.page);
        let page = booru.page(cancel, &query, self.page).await?;

        let (removed, posts) = if self.no_blacklist {
            (0, page.posts)
        } else {
            sources.blacklist().filter(page.posts)
        };

        for post in &posts {
            println!("{}", post_line(post));
        }

        let remaining = page
            .remaining
            .map_or_else(|| "unknown".to_string(), |r| r.to_string());

        println!(
            "{} posts, {} blacklisted, pages left: {}",
            posts.len().to_string().bold().green(),
            removed.to_string().bold().red(),
            remaining.bold()
        );

        Ok(())
    }
}
