use std::sync::Arc;

use anyhow::anyhow;
use boorumux_extractors::prelude::*;
use owo_colors::OwoColorize;

pub mod page;
pub mod post;

/// Looks up `name` among the configured sources.
pub(crate) fn find_source<'a>(sources: &'a Sources, name: &str) -> anyhow::Result<&'a Arc<dyn Booru>> {
    sources.get(name).ok_or_else(|| {
        anyhow!(
            "No source named \"{name}\". Configured sources: {}",
            sources.names().collect::<Vec<_>>().join(", ")
        )
    })
}

/// Prints every configured source along with what it can do.
pub fn print_sources(sources: &Sources) {
    println!("{}", "Configured sources:".bold());

    for (name, booru) in sources.iter() {
        let features = booru.features();
        let mut caps = Vec::with_capacity(3);

        if features.contains(BooruFeatures::TAG_SEARCH) {
            caps.push("search");
        }
        if features.contains(BooruFeatures::SINGLE_POST_FETCH) {
            caps.push("post lookup");
        }
        if features.contains(BooruFeatures::PAGE_COUNT) {
            caps.push("page count");
        }

        println!("  {} ({})", name.bold().blue(), caps.join(", "));
    }

    println!(
        "{} blacklist filters active",
        sources.blacklist().len().to_string().bold()
    );
}

/// One line per post: origin, id, rating, size and file url.
pub(crate) fn post_line(post: &Post) -> String {
    format!(
        "{}#{} [{}] {}x{} {} {}",
        post.origin.name(),
        post.id,
        post.rating,
        post.original.width,
        post.original.height,
        post.created.format("%Y-%m-%d %H:%M"),
        post.original.href
    )
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use boorumux_common::{chrono::TimeZone, chrono::Utc, reqwest::Client};
    use boorumux_extractors::prelude::*;

    use super::{find_source, post_line};

    struct Here(Client);

    impl Origin for Here {
        fn name(&self) -> &str {
            "safebooru"
        }

        fn http(&self) -> &Client {
            &self.0
        }
    }

    #[test]
    fn formats_posts() {
        let post = Post {
            id: 5,
            score: 3,
            source: String::new(),
            created: Utc.with_ymd_and_hms(2024, 1, 3, 15, 0, 0).unwrap(),
            updated: Default::default(),
            tags: vec!["cat".to_string()],
            original: Image {
                href: "https://cdn.example.test/5.png".to_string(),
                mime: "image/png".to_string(),
                size: 10,
                width: 640,
                height: 480,
            },
            thumbnail: Image::default(),
            rating: Rating::Sensitive,
            origin: Arc::new(Here(Client::new())),
        };

        assert_eq!(
            post_line(&post),
            "safebooru#5 [sensitive] 640x480 2024-01-03 15:00 https://cdn.example.test/5.png"
        );
    }

    #[test]
    fn unknown_source() {
        let sources = Config::from_toml("").unwrap().build().unwrap();
        let Err(err) = find_source(&sources, "nope") else {
            panic!("found a source that was never configured");
        };
        assert!(err.to_string().starts_with("No source named \"nope\""));
    }
}
