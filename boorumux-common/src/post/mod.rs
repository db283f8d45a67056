//! Main representation of a imageboard post
//!
//! # Post
//! A [`Post` struct](Post) is a generic representation of an imageboard post.
//!
//! Every extractor maps its site's own JSON into this shape. Posts are never
//! cached: each one is rebuilt from a live API call and is not modified after
//! the extractor hands it out.
use chrono::{DateTime, Utc};
use reqwest::Client;

use std::{fmt::Debug, sync::Arc};

use self::{image::Image, rating::Rating};

pub mod image;
pub mod rating;

/// Read-only handle to the extractor a [`Post`] came from.
///
/// Some imageboards only serve files to clients that look like the one that
/// performed the search, so downloads of [`Post::original`] or
/// [`Post::thumbnail`] should go through [`Origin::http`].
pub trait Origin: Send + Sync {
    /// Name of the configured source, e.g. `safebooru`.
    fn name(&self) -> &str;

    /// The client used to talk to this imageboard.
    fn http(&self) -> &Client;
}

/// Catchall model for an imageboard post.
#[derive(Clone)]
pub struct Post {
    /// ID number of the post. Only unique within the imageboard it came from.
    pub id: u64,
    /// Score of the post.
    pub score: i64,
    /// Where the artwork was taken from. Usually a url, empty when unknown.
    pub source: String,
    /// When the post was created.
    pub created: DateTime<Utc>,
    /// When the post was last updated.
    pub updated: DateTime<Utc>,
    /// Tags in the imageboard's own spelling (`long_hair`, not `long hair`).
    pub tags: Vec<String>,
    /// The original or highest quality file.
    pub original: Image,
    /// A small preview of the post.
    pub thumbnail: Image,
    pub rating: Rating,
    /// The extractor that produced this post.
    pub origin: Arc<dyn Origin>,
}

impl Debug for Post {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Post")
            .field("Post ID", &self.id)
            .field("Origin", &self.origin.name())
            .field("Score", &self.score)
            .field("Source", &self.source)
            .field("Created", &self.created)
            .field("Updated", &self.updated)
            .field("Rating", &self.rating)
            .field("Original", &self.original)
            .field("Thumbnail", &self.thumbnail)
            .field("Tag List", &self.tags)
            .finish()
    }
}

impl Post {
    /// Checks if the post carries exactly this tag.
    #[inline]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub posts: Vec<Post>,
    /// Pages left after this one, or `None` if the imageboard doesn't say.
    pub remaining: Option<u32>,
}

/// Timestamp used when an imageboard sends one we can't parse.
#[inline]
pub fn zero_time() -> DateTime<Utc> {
    DateTime::<Utc>::default()
}

/// Converts `limit`/`offset`/`total` pagination counters into the number of
/// pages left, rounding up.
///
/// Returns `None` when `limit` is zero since nothing can be inferred from it.
pub const fn remaining_pages(total: u64, offset: u64, limit: u64) -> Option<u32> {
    if limit == 0 {
        return None;
    }

    let left = total.saturating_sub(offset);
    let pages = left.div_ceil(limit);

    if pages > u32::MAX as u64 {
        Some(u32::MAX)
    } else {
        Some(pages as u32)
    }
}
