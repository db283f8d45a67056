//! Combines several sources into one
//!
//! A [`BooruMux`] sends every search to all of its members at once and merges
//! what they return, newest posts first.
//!
//! Searches are all-or-nothing: as soon as one member fails, the others are
//! cancelled and that first error is returned. Cancellation errors coming
//! from the members that were stopped never replace it.
use async_trait::async_trait;
use boorumux_common::{
    log::{debug, warn},
    post::{Page, Post},
    reqwest::Client,
    tokio::time::Instant,
    Query,
};
use std::{sync::Arc, time::Duration};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::error::BooruError;
use crate::extractor::{caps::BooruFeatures, Booru};

/// A source made out of other sources.
pub struct BooruMux {
    name: String,
    members: Vec<Arc<dyn Booru>>,
}

impl BooruMux {
    pub fn new(name: &str, members: Vec<Arc<dyn Booru>>) -> Self {
        Self {
            name: name.to_string(),
            members,
        }
    }

    pub fn members(&self) -> &[Arc<dyn Booru>] {
        &self.members
    }
}

#[async_trait]
impl Booru for BooruMux {
    async fn page(
        &self,
        cancel: &CancellationToken,
        query: &Query,
        page: u32,
    ) -> Result<Page, BooruError> {
        if self.members.is_empty() {
            return Ok(Page::default());
        }

        let start = Instant::now();
        // Cancelling this one stops the members without touching the caller's token
        let siblings = cancel.child_token();
        let mut tasks = JoinSet::new();

        for member in &self.members {
            let member = member.clone();
            let token = siblings.clone();
            let query = query.clone();

            tasks.spawn(async move {
                let res = member.page(&token, &query, page).await;
                (member.name().to_string(), res.map(|p| p.posts))
            });
        }

        let mut posts: Vec<Post> = Vec::new();
        let mut failure: Option<BooruError> = None;
        let mut cancelled = false;

        while let Some(joined) = tasks.join_next().await {
            let (member, res) = match joined {
                Ok(out) => out,
                Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                Err(_) => {
                    cancelled = true;
                    continue;
                }
            };

            match res {
                Ok(mut found) => {
                    if failure.is_none() {
                        posts.append(&mut found);
                    }
                }
                Err(e) if e.is_cancelled() => cancelled = true,
                Err(e) => {
                    if failure.is_some() {
                        warn!("[{}] Ignoring error from {member}: {e}", self.name);
                        continue;
                    }

                    debug!("[{}] {member} failed, cancelling the other sources", self.name);
                    siblings.cancel();
                    failure = Some(e);
                }
            }
        }

        if let Some(e) = failure {
            return Err(e);
        }

        if cancelled {
            return Err(BooruError::Cancelled);
        }

        posts.sort_unstable_by(|a, b| b.created.cmp(&a.created));

        debug!(
            "[{}] Merged {} posts from {} sources in {:?}",
            self.name,
            posts.len(),
            self.members.len(),
            start.elapsed()
        );

        Ok(Page {
            posts,
            // Each member pages differently, so there is no meaningful total
            remaining: None,
        })
    }

    async fn post(&self, _cancel: &CancellationToken, _id: u64) -> Result<Post, BooruError> {
        // Ids are only unique within a single imageboard
        Err(BooruError::Unsupported {
            operation: "post lookup",
            source_name: self.name.clone(),
        })
    }

    fn http(&self) -> Option<Client> {
        None
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn features(&self) -> BooruFeatures {
        BooruFeatures::AGGREGATE
    }
}

/// Returns a child of `parent` that also gets cancelled once `timeout` elapses.
///
/// Must be called from within a tokio runtime.
pub fn cancel_after(parent: &CancellationToken, timeout: Duration) -> CancellationToken {
    let token = parent.child_token();
    let deadline = token.clone();

    tokio::spawn(async move {
        tokio::select! {
            () = deadline.cancelled() => {}
            () = tokio::time::sleep(timeout) => {
                debug!("Deadline of {timeout:?} reached, cancelling");
                deadline.cancel();
            }
        }
    });

    token
}

#[cfg(test)]
mod test {
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    };
    use std::time::Duration;

    use async_trait::async_trait;
    use boorumux_common::{
        chrono::{TimeZone, Utc},
        post::{Origin, Page, Post},
        reqwest::Client,
        Image, Query, Rating,
    };
    use tokio_util::sync::CancellationToken;

    use super::{cancel_after, BooruMux};
    use crate::error::{BooruError, HttpError};
    use crate::extractor::{caps::BooruFeatures, Booru};

    struct Dummy(Client);

    impl Origin for Dummy {
        fn name(&self) -> &str {
            "dummy"
        }

        fn http(&self) -> &Client {
            &self.0
        }
    }

    fn post(id: u64, day: u32) -> Post {
        Post {
            id,
            score: 0,
            source: String::new(),
            created: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            updated: Default::default(),
            tags: Vec::new(),
            original: Image::default(),
            thumbnail: Image::default(),
            rating: Rating::General,
            origin: Arc::new(Dummy(Client::new())),
        }
    }

    /// Answers after `delay`, unless cancelled first.
    struct Fake {
        name: &'static str,
        delay: Duration,
        result: Result<Vec<Post>, u16>,
        was_cancelled: Arc<AtomicBool>,
    }

    impl Fake {
        fn ok(name: &'static str, delay_ms: u64, posts: Vec<Post>) -> Self {
            Self {
                name,
                delay: Duration::from_millis(delay_ms),
                result: Ok(posts),
                was_cancelled: Arc::default(),
            }
        }

        fn failing(name: &'static str, delay_ms: u64, code: u16) -> Self {
            Self {
                result: Err(code),
                ..Self::ok(name, delay_ms, Vec::new())
            }
        }
    }

    #[async_trait]
    impl Booru for Fake {
        async fn page(
            &self,
            cancel: &CancellationToken,
            _query: &Query,
            _page: u32,
        ) -> Result<Page, BooruError> {
            tokio::select! {
                () = cancel.cancelled() => {
                    self.was_cancelled.store(true, Ordering::SeqCst);
                    Err(BooruError::Cancelled)
                }
                () = tokio::time::sleep(self.delay) => match &self.result {
                    Ok(posts) => Ok(Page { posts: posts.clone(), remaining: Some(3) }),
                    Err(code) => Err(HttpError::new(format!("https://{}.test/posts.json", self.name), *code).into()),
                },
            }
        }

        async fn post(&self, _cancel: &CancellationToken, _id: u64) -> Result<Post, BooruError> {
            Err(BooruError::NotFound)
        }

        fn http(&self) -> Option<Client> {
            None
        }

        fn name(&self) -> &str {
            self.name
        }

        fn features(&self) -> BooruFeatures {
            BooruFeatures::TAG_SEARCH
        }
    }

    #[tokio::test(start_paused = true)]
    async fn merges_newest_first() {
        let mux = BooruMux::new(
            "mux",
            vec![
                Arc::new(Fake::ok("a", 20, vec![post(1, 3), post(2, 1)])),
                Arc::new(Fake::ok("b", 10, vec![post(3, 2)])),
            ],
        );

        let page = mux
            .page(&CancellationToken::new(), &Query::parse("cat"), 0)
            .await
            .unwrap();

        assert_eq!(page.posts.iter().map(|p| p.id).collect::<Vec<_>>(), [1, 3, 2]);
        assert_eq!(page.remaining, None);
    }

    #[tokio::test(start_paused = true)]
    async fn first_failure_wins() {
        let slow = Fake::ok("c", 10_000, vec![post(3, 3)]);
        let slow_cancelled = slow.was_cancelled.clone();

        let mux = BooruMux::new(
            "mux",
            vec![
                Arc::new(Fake::ok("a", 10, vec![post(1, 1)])),
                Arc::new(Fake::failing("b", 20, 503)),
                Arc::new(slow),
            ],
        );

        let err = mux
            .page(&CancellationToken::new(), &Query::default(), 0)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(503));
        assert_eq!(
            err.to_string(),
            "booru: https://b.test/posts.json returned status 503: unavailable"
        );
        assert!(slow_cancelled.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn later_failures_are_ignored() {
        let mux = BooruMux::new(
            "mux",
            vec![
                Arc::new(Fake::failing("a", 10, 404)),
                Arc::new(Fake::failing("b", 10, 500)),
            ],
        );

        let err = mux
            .page(&CancellationToken::new(), &Query::default(), 0)
            .await
            .unwrap_err();

        // Both complete on the same tick, only one of them may surface
        assert!(matches!(err.status(), Some(404 | 500)));
    }

    #[tokio::test(start_paused = true)]
    async fn caller_cancellation() {
        let slow = Fake::ok("a", 10_000, vec![post(1, 1)]);
        let flag = slow.was_cancelled.clone();
        let mux = BooruMux::new("mux", vec![Arc::new(slow)]);

        let cancel = CancellationToken::new();
        let deadline = cancel_after(&cancel, Duration::from_millis(50));

        let err = mux.page(&deadline, &Query::default(), 0).await.unwrap_err();

        assert!(err.is_cancelled());
        assert!(flag.load(Ordering::SeqCst));
        // The deadline never leaks into the caller's token
        assert!(!cancel.is_cancelled());
    }

    #[tokio::test]
    async fn already_cancelled() {
        let mux = BooruMux::new("mux", vec![Arc::new(Fake::ok("a", 10, vec![post(1, 1)]))]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = mux.page(&cancel, &Query::default(), 0).await.unwrap_err();
        assert!(err.is_cancelled());
    }

    /// Succeeds, but cancels the caller's token on the way out.
    struct LateCancel(CancellationToken);

    #[async_trait]
    impl Booru for LateCancel {
        async fn page(
            &self,
            _cancel: &CancellationToken,
            _query: &Query,
            _page: u32,
        ) -> Result<Page, BooruError> {
            self.0.cancel();
            Ok(Page {
                posts: vec![post(7, 2)],
                remaining: None,
            })
        }

        async fn post(&self, _cancel: &CancellationToken, _id: u64) -> Result<Post, BooruError> {
            Err(BooruError::NotFound)
        }

        fn http(&self) -> Option<Client> {
            None
        }

        fn name(&self) -> &str {
            "late"
        }

        fn features(&self) -> BooruFeatures {
            BooruFeatures::TAG_SEARCH
        }
    }

    #[tokio::test]
    async fn late_cancellation_keeps_results() {
        let cancel = CancellationToken::new();
        let mux = BooruMux::new("mux", vec![Arc::new(LateCancel(cancel.clone()))]);

        let page = mux.page(&cancel, &Query::default(), 0).await.unwrap();

        assert!(cancel.is_cancelled());
        assert_eq!(page.posts.iter().map(|p| p.id).collect::<Vec<_>>(), [7]);
    }

    #[tokio::test]
    async fn no_members() {
        let mux = BooruMux::new("empty", Vec::new());
        let page = mux
            .page(&CancellationToken::new(), &Query::default(), 0)
            .await
            .unwrap();

        assert!(page.posts.is_empty());
        assert_eq!(page.remaining, None);
    }

    #[tokio::test]
    async fn post_is_unsupported() {
        let mux = BooruMux::new("mux", vec![Arc::new(Fake::ok("a", 0, Vec::new()))]);
        let err = mux.post(&CancellationToken::new(), 1).await.unwrap_err();

        assert!(matches!(err, BooruError::Unsupported { .. }));
        assert!(!matches!(err, BooruError::NotFound));
        assert!(mux.http().is_none());
        assert_eq!(mux.features(), BooruFeatures::AGGREGATE);
    }
}
