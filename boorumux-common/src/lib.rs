//! Canonical data model shared by every boorumux extractor.
//!
//! Everything a booru API returns ends up as one of the types in [`post`], no
//! matter which site it came from. Searches are described with a [`Query`].

// Public Exports
pub use chrono;
pub use log;
pub use reqwest;
pub use serde;
pub use serde_json;
pub use tokio;

pub mod macros;
pub mod post;
pub mod query;

pub use post::{image::Image, rating::Rating, Origin, Page, Post};
pub use query::Query;

/// User-Agent sent to imageboards when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("boorumux/", env!("CARGO_PKG_VERSION"));
