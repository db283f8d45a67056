use boorumux_extractors::prelude::*;
use clap::Args;
use owo_colors::OwoColorize;

use super::find_source;

#[derive(Debug, Args)]
pub struct PostCmd {
    /// Source the post belongs to
    pub source: String,

    /// Id of the post on that source
    pub id: u64,
}

impl PostCmd {
    /// Prints every field of the post. The blacklist is not applied, since
    /// the post was asked for explicitly.
    pub async fn run(&self, sources: &Sources, cancel: &CancellationToken) -> anyhow::Result<()> {
        let booru = find_source(sources, &self.source)?;
        let post = booru.post(cancel, self.id).await?;

        println!("{} {}#{}", "Post".bold(), post.origin.name(), post.id);
        println!("  {:<10}{}", "rating", post.rating);
        println!("  {:<10}{}", "score", post.score);
        println!("  {:<10}{}", "created", post.created.to_rfc3339());
        println!("  {:<10}{}", "updated", post.updated.to_rfc3339());
        if !post.source.is_empty() {
            println!("  {:<10}{}", "source", post.source);
        }
        println!(
            "  {:<10}{} ({}, {}x{}, {} bytes)",
            "file",
            post.original.href.blue(),
            post.original.mime,
            post.original.width,
            post.original.height,
            post.original.size
        );
        println!("  {:<10}{}", "thumbnail", post.thumbnail.href);
        println!("  {:<10}{}", "tags", post.tags.join(" "));

        Ok(())
    }
}
