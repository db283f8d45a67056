//! Post extractor for Gelbooru-based imageboards
//!
//! Both searches and single post lookups go through the DAPI endpoint
//! (`/index.php?page=dapi&s=post&q=index&json=1`), which wraps the posts in an
//! object carrying `limit`/`offset`/`count` counters. Those are used to work
//! out how many pages are left.
//!
//! API documentation: <https://gelbooru.com/index.php?page=wiki&s=view&id=18780>

use boorumux_common::{
    post::{
        image::{mime_from_url, Image, THUMBNAIL_MIME},
        rating::Rating,
        remaining_pages, Origin, Page, Post,
    },
    Query,
};
use std::sync::Arc;
use url::Url;

use crate::error::BooruError;
use crate::extractor::caps::BooruFeatures;
use crate::extractor::common::{endpoint, from_epoch, parse_ruby_date, split_tags};
use crate::extractor::SiteApi;
use crate::imageboards::gelbooru::models::{GelbooruPost, GelbooruTopLevel};

mod models;

#[derive(Debug, Clone, Copy, Default)]
pub struct GelbooruApi;

impl GelbooruApi {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Gelbooru spells ratings out. Older installs still send the
    /// `safe`/`s`/`q`/`e` vocabulary, where `s` meant safe.
    pub fn rating(raw: &str) -> Rating {
        match raw {
            "sensitive" => Rating::Sensitive,
            "questionable" | "q" => Rating::Questionable,
            "explicit" | "e" => Rating::Explicit,
            // "general", "safe", "s" and anything unknown
            _ => Rating::General,
        }
    }

    /// Common part of every DAPI url.
    fn dapi(base_url: &Url) -> Url {
        let mut url = endpoint(base_url, &["index.php"]);
        url.query_pairs_mut()
            .append_pair("page", "dapi")
            .append_pair("s", "post")
            .append_pair("q", "index")
            .append_pair("json", "1");
        url
    }

    fn map_post(post: GelbooruPost, origin: &Arc<dyn Origin>) -> Post {
        let href = post.file_url.unwrap_or_default();

        Post {
            id: post.id.unwrap_or_default(),
            score: post.score.unwrap_or_default(),
            source: post.source.unwrap_or_default(),
            created: parse_ruby_date(post.created_at.as_deref()),
            updated: from_epoch(post.change),
            tags: split_tags(post.tags.as_deref()),
            original: Image {
                mime: mime_from_url(&href),
                href,
                // never reported
                size: 0,
                width: post.width.unwrap_or_default(),
                height: post.height.unwrap_or_default(),
            },
            thumbnail: Image {
                href: post.preview_url.unwrap_or_default(),
                mime: THUMBNAIL_MIME.to_string(),
                size: 0,
                width: post.preview_width.unwrap_or_default(),
                height: post.preview_height.unwrap_or_default(),
            },
            rating: Self::rating(post.rating.as_deref().unwrap_or_default()),
            origin: origin.clone(),
        }
    }
}

impl SiteApi for GelbooruApi {
    type PostListResponse = GelbooruTopLevel;
    // Single post lookups return the same envelope with at most one post
    type SinglePostResponse = GelbooruTopLevel;

    fn posts_url(&self, base_url: &Url, query: &Query, page: u32) -> Url {
        // 'pid' is already 0-indexed
        let mut url = Self::dapi(base_url);
        url.query_pairs_mut()
            .append_pair("pid", &page.to_string())
            .append_pair("tags", &query.tag_string());
        url
    }

    fn single_post_url(&self, base_url: &Url, post_id: u64) -> Url {
        let mut url = Self::dapi(base_url);
        url.query_pairs_mut().append_pair("id", &post_id.to_string());
        url
    }

    fn map_post_list_response(
        &self,
        response: Self::PostListResponse,
        origin: &Arc<dyn Origin>,
    ) -> Page {
        let attrs = &response.attributes;
        let remaining = remaining_pages(attrs.total, attrs.offset, attrs.limit);

        Page {
            posts: response
                .post
                .into_iter()
                .map(|p| Self::map_post(p, origin))
                .collect(),
            remaining,
        }
    }

    fn map_single_post_response(
        &self,
        response: Self::SinglePostResponse,
        origin: &Arc<dyn Origin>,
    ) -> Result<Post, BooruError> {
        response
            .post
            .into_iter()
            .next()
            .map(|p| Self::map_post(p, origin))
            .ok_or(BooruError::NotFound)
    }

    fn features(&self) -> BooruFeatures {
        BooruFeatures::TAG_SEARCH | BooruFeatures::SINGLE_POST_FETCH | BooruFeatures::PAGE_COUNT
    }
}

#[cfg(test)]
mod test {
    use boorumux_common::{reqwest::Client, Query, Rating};
    use url::Url;

    use super::GelbooruApi;
    use crate::error::BooruError;
    use crate::extractor::{caps::BooruFeatures, Booru, ExtractorClient, PostExtractor, SiteApi};

    const POST_LIST: &str = r#"{
        "@attributes": {"limit": 100, "offset": 200, "count": 1050},
        "post": [
            {
                "id": 9001,
                "created_at": "Wed Jan 03 10:00:00 -0500 2024",
                "change": 1704380400,
                "score": 7,
                "source": "",
                "rating": "questionable",
                "tags": "1girl  cat_ears ",
                "file_url": "https://img.example.test/images/12/34/1234.jpg",
                "width": 800,
                "height": 600,
                "preview_url": "https://img.example.test/thumbnails/12/34/thumbnail_1234.jpg",
                "preview_width": 250,
                "preview_height": 188
            },
            {
                "id": 9002,
                "created_at": "not a date",
                "rating": "mystery",
                "file_url": "https://img.example.test/images/56/78/5678.mp4"
            }
        ]
    }"#;

    fn extractor() -> PostExtractor<GelbooruApi> {
        let client = ExtractorClient::new(
            "gelbooru",
            Url::parse("https://gelbooru.example.test").unwrap(),
            Client::new(),
            Some("boorumux/test".to_string()),
        );
        PostExtractor::new(client, GelbooruApi::new())
    }

    #[test]
    fn urls() {
        let ex = extractor();

        assert_eq!(
            ex.api()
                .posts_url(ex.base_url(), &Query::new(&["cat", "-dog"]), 3)
                .as_str(),
            "https://gelbooru.example.test/index.php?page=dapi&s=post&q=index&json=1&pid=3&tags=cat+-dog"
        );
        assert_eq!(
            ex.api().single_post_url(ex.base_url(), 42).as_str(),
            "https://gelbooru.example.test/index.php?page=dapi&s=post&q=index&json=1&id=42"
        );
    }

    #[test]
    fn map_post_list() {
        let page = extractor().map_posts(POST_LIST).unwrap();

        // ceil((1050 - 200) / 100)
        assert_eq!(page.remaining, Some(9));
        assert_eq!(page.posts.len(), 2);

        let first = &page.posts[0];
        assert_eq!(first.id, 9001);
        assert_eq!(first.score, 7);
        assert_eq!(first.source, "");
        assert_eq!(first.rating, Rating::Questionable);
        assert_eq!(first.tags, ["1girl", "cat_ears"]);
        assert_eq!(first.created.to_rfc3339(), "2024-01-03T15:00:00+00:00");
        assert_eq!(first.updated.to_rfc3339(), "2024-01-04T15:00:00+00:00");
        assert_eq!(first.original.mime, "image/jpeg");
        assert_eq!(first.original.size, 0);
        assert_eq!((first.original.width, first.original.height), (800, 600));
        assert_eq!(first.thumbnail.mime, "image/jpeg");
        assert_eq!((first.thumbnail.width, first.thumbnail.height), (250, 188));

        let second = &page.posts[1];
        assert_eq!(second.rating, Rating::General);
        assert_eq!(second.created.timestamp(), 0);
        assert_eq!(second.updated.timestamp(), 0);
        assert!(second.original.is_video());
        assert_eq!(second.original.width, 0);
        assert!(second.tags.is_empty());
    }

    #[test]
    fn empty_result_has_no_post_key() {
        let page = extractor()
            .map_posts(r#"{"@attributes": {"limit": 100, "offset": 0, "count": 0}}"#)
            .unwrap();
        assert!(page.posts.is_empty());
        assert_eq!(page.remaining, Some(0));
    }

    #[test]
    fn legacy_total_and_zero_limit() {
        let page = extractor()
            .map_posts(r#"{"@attributes": {"limit": 10, "offset": 0, "total": 25}, "post": []}"#)
            .unwrap();
        assert_eq!(page.remaining, Some(3));

        let page = extractor()
            .map_posts(r#"{"@attributes": {"limit": 0, "offset": 0, "count": 25}}"#)
            .unwrap();
        assert_eq!(page.remaining, None);
    }

    #[test]
    fn single_post_not_found() {
        let res = extractor().map_post(r#"{"@attributes": {"limit": 100, "offset": 0, "count": 0}}"#);
        assert!(matches!(res, Err(BooruError::NotFound)));
    }

    #[test]
    fn single_post() {
        let post = extractor()
            .map_post(r#"{"post": [{"id": 42, "rating": "explicit", "tags": "dog"}]}"#)
            .unwrap();
        assert_eq!(post.id, 42);
        assert_eq!(post.rating, Rating::Explicit);
        assert_eq!(post.tags, ["dog"]);
    }

    #[test]
    fn ratings() {
        assert_eq!(GelbooruApi::rating("general"), Rating::General);
        assert_eq!(GelbooruApi::rating("safe"), Rating::General);
        assert_eq!(GelbooruApi::rating("sensitive"), Rating::Sensitive);
        assert_eq!(GelbooruApi::rating("e"), Rating::Explicit);
        assert_eq!(GelbooruApi::rating("???"), Rating::General);
    }

    #[test]
    fn malformed_json() {
        for body in ["5", r#""posts""#, r#"{"post": {"id": 1}}"#, "{"] {
            assert!(
                matches!(extractor().map_posts(body), Err(BooruError::Decode(_))),
                "{body}"
            );
        }
    }

    #[test]
    fn bare_array_is_not_an_envelope() {
        let body = r#"[{"id": 1, "tags": "cat", "rating": "general"}]"#;

        assert!(matches!(extractor().map_posts(body), Err(BooruError::Decode(_))));
        assert!(matches!(extractor().map_posts("[]"), Err(BooruError::Decode(_))));
        // A decode failure, never mistaken for a missing post
        assert!(matches!(
            extractor().map_post(r#"[{"id": 1}]"#),
            Err(BooruError::Decode(_))
        ));
    }

    #[test]
    fn reports_page_count() {
        assert!(extractor().features().contains(BooruFeatures::PAGE_COUNT));
    }
}
