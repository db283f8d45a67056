//! Site-specific API logic
//!
//! Every module here implements [`SiteApi`](crate::extractor::SiteApi) for a
//! family of imageboards sharing the same API. Each one sits behind a feature
//! flag of the same name.
#[cfg(feature = "danbooru")]
pub mod danbooru;

#[cfg(feature = "gelbooru")]
pub mod gelbooru;
