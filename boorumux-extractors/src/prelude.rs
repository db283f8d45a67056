pub use crate::blacklist::{Blacklist, Filter};
pub use crate::error::{BooruError, ConfigError, HttpError};
pub use crate::extractor::caps::BooruFeatures;
pub use crate::extractor::{Booru, ExtractorClient, PostExtractor, SiteApi};
pub use crate::extractor_config::{BooruKind, Config, SourceConfig, Sources};
pub use crate::mux::{cancel_after, BooruMux};
pub use crate::CancellationToken;
pub use boorumux_common::{Image, Origin, Page, Post, Query, Rating};

#[cfg(feature = "danbooru")]
pub use crate::imageboards::danbooru::DanbooruApi;
#[cfg(feature = "gelbooru")]
pub use crate::imageboards::gelbooru::GelbooruApi;
