//! # Extractors
//!
//! Everything that can be searched implements [`Booru`]: the per-site
//! [`PostExtractor`]s and the [`BooruMux`](crate::mux::BooruMux) that combines
//! several of them.
//!
//! A site is added by implementing [`SiteApi`], which only knows how to build
//! urls and how to turn that site's JSON into posts. [`PostExtractor`] does the
//! actual HTTP work, so every site shares the same request, cancellation and
//! status code handling.
use async_trait::async_trait;
use boorumux_common::{
    post::{Origin, Page, Post},
    reqwest::Client,
    Query,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::BooruError;
use crate::extractor::caps::BooruFeatures;

pub mod caps;
pub mod common;
mod post_extractor;

pub use post_extractor::{ExtractorClient, PostExtractor};

/// This trait is the only public interface a source exposes.
///
/// Implementations hold no per-call state, so a single instance can serve
/// any number of concurrent calls.
#[async_trait]
pub trait Booru: Send + Sync {
    /// Fetches one page of posts matching `query`.
    ///
    /// Pages are counted from zero regardless of how the imageboard numbers
    /// them. The number of posts per page is up to the imageboard and may be
    /// lower than usual when it filters results on its side.
    ///
    /// Cancelling `cancel` aborts the request and yields [`BooruError::Cancelled`].
    async fn page(
        &self,
        cancel: &CancellationToken,
        query: &Query,
        page: u32,
    ) -> Result<Page, BooruError>;

    /// Fetches a single post by its imageboard-local id.
    ///
    /// Fails with [`BooruError::NotFound`] when the imageboard answers
    /// successfully but without any post.
    async fn post(&self, cancel: &CancellationToken, id: u64) -> Result<Post, BooruError>;

    /// The client used to talk to the imageboard, for replaying file downloads.
    ///
    /// Sources that don't talk to a single imageboard return `None`.
    fn http(&self) -> Option<Client>;

    /// Name of this source.
    fn name(&self) -> &str;

    /// Expose some bitflags to indicate the features this source supports.
    fn features(&self) -> BooruFeatures;
}

/// Site-specific half of an extractor.
///
/// Implementors describe where to send requests and how to read the answers;
/// [`PostExtractor`] takes care of everything in between.
pub trait SiteApi: Send + Sync + 'static {
    /// Shape of the JSON returned by a search.
    type PostListResponse: DeserializeOwned;
    /// Shape of the JSON returned by a single post lookup.
    type SinglePostResponse: DeserializeOwned;

    /// Builds the search url for the zero-based `page`.
    fn posts_url(&self, base_url: &Url, query: &Query, page: u32) -> Url;

    /// Builds the url used to look up post `post_id`.
    fn single_post_url(&self, base_url: &Url, post_id: u64) -> Url;

    /// Maps a decoded search response into posts.
    fn map_post_list_response(
        &self,
        response: Self::PostListResponse,
        origin: &Arc<dyn Origin>,
    ) -> Page;

    /// Maps a decoded single post response into a post.
    fn map_single_post_response(
        &self,
        response: Self::SinglePostResponse,
        origin: &Arc<dyn Origin>,
    ) -> Result<Post, BooruError>;

    fn features(&self) -> BooruFeatures;
}
