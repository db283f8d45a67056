//! Imageboard extractors, the source aggregator and the post blacklist.
//!
//! Sources are usually not built by hand but out of a [`Config`](extractor_config::Config):
//! ```no_run
//! use boorumux_extractors::prelude::*;
//!
//! async fn newest_cats() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(&Config::default_path()?)?;
//!     let sources = config.build()?;
//!
//!     let mux = sources.get("mux").expect("no source named mux");
//!     let page = mux.page(&CancellationToken::new(), &Query::parse("cat_ears"), 0).await?;
//!     let (removed, posts) = sources.blacklist().filter(page.posts);
//!
//!     println!("{} posts, {removed} blacklisted", posts.len());
//!     Ok(())
//! }
//! ```

pub mod blacklist;
pub mod error;
pub mod extractor;
pub mod extractor_config;
pub mod imageboards;
pub mod mux;
pub mod prelude;

pub use tokio_util::sync::CancellationToken;
