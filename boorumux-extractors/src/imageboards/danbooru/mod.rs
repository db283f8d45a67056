//! Post extractor for Danbooru and its forks (`https://danbooru.donmai.us`,
//! `https://safebooru.donmai.us`, ...)
//!
//! Searches go to `/posts.json`, which answers with a plain JSON array and no
//! pagination counters, so the number of remaining pages is always unknown.
//! Single posts are read from `/posts/<id>.json`.
use self::models::DanbooruPost;
use crate::error::BooruError;
use crate::extractor::caps::BooruFeatures;
use crate::extractor::common::{endpoint, parse_rfc3339, split_tags};
use crate::extractor::SiteApi;
use boorumux_common::{
    post::{
        image::{mime_from_ext, mime_from_url, Image, THUMBNAIL_MIME},
        rating::Rating,
        Origin, Page, Post,
    },
    Query,
};
use std::sync::Arc;
use url::Url;

mod models;

/// API logic for Danbooru.
#[derive(Debug, Clone, Copy, Default)]
pub struct DanbooruApi;

impl DanbooruApi {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Danbooru rates posts with single letters, long names are accepted too.
    pub fn rating(raw: &str) -> Rating {
        match raw {
            "s" | "sensitive" => Rating::Sensitive,
            "q" | "questionable" => Rating::Questionable,
            "e" | "explicit" => Rating::Explicit,
            // "g", "general" and anything unknown
            _ => Rating::General,
        }
    }

    fn map_post(post: DanbooruPost, origin: &Arc<dyn Origin>) -> Post {
        let href = post.file_url.unwrap_or_default();
        let mime = match post.file_ext.as_deref() {
            Some(ext) if !ext.is_empty() => mime_from_ext(ext),
            _ => mime_from_url(&href),
        };

        Post {
            id: post.id.unwrap_or_default(),
            score: post.score.unwrap_or_default(),
            source: post.source.unwrap_or_default(),
            created: parse_rfc3339(post.created_at.as_deref()),
            updated: parse_rfc3339(post.updated_at.as_deref()),
            tags: split_tags(post.tag_string.as_deref()),
            original: Image {
                href,
                mime,
                size: post.file_size.unwrap_or_default(),
                width: post.image_width.unwrap_or_default(),
                height: post.image_height.unwrap_or_default(),
            },
            thumbnail: Image {
                href: post.preview_file_url.unwrap_or_default(),
                mime: THUMBNAIL_MIME.to_string(),
                ..Image::default()
            },
            rating: Self::rating(post.rating.as_deref().unwrap_or_default()),
            origin: origin.clone(),
        }
    }
}

impl SiteApi for DanbooruApi {
    type PostListResponse = Vec<DanbooruPost>;
    type SinglePostResponse = DanbooruPost;

    fn posts_url(&self, base_url: &Url, query: &Query, page: u32) -> Url {
        // Danbooru counts pages from 1
        let mut url = endpoint(base_url, &["posts.json"]);
        url.query_pairs_mut()
            .append_pair("page", &page.saturating_add(1).to_string())
            .append_pair("tags", &query.tag_string());
        url
    }

    fn single_post_url(&self, base_url: &Url, post_id: u64) -> Url {
        endpoint(base_url, &["posts", &format!("{post_id}.json")])
    }

    fn map_post_list_response(
        &self,
        response: Self::PostListResponse,
        origin: &Arc<dyn Origin>,
    ) -> Page {
        Page {
            posts: response
                .into_iter()
                .map(|p| Self::map_post(p, origin))
                .collect(),
            remaining: None,
        }
    }

    fn map_single_post_response(
        &self,
        response: Self::SinglePostResponse,
        origin: &Arc<dyn Origin>,
    ) -> Result<Post, BooruError> {
        Ok(Self::map_post(response, origin))
    }

    fn features(&self) -> BooruFeatures {
        BooruFeatures::TAG_SEARCH | BooruFeatures::SINGLE_POST_FETCH
    }
}
