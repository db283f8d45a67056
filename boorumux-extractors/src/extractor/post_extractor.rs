use async_trait::async_trait;
use boorumux_common::{
    log::debug,
    post::{Origin, Page, Post},
    reqwest::{header::USER_AGENT, Client, StatusCode},
    tokio::time::Instant,
    Query,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::{caps::BooruFeatures, Booru, SiteApi};
use crate::error::{BooruError, HttpError};

/// Connection details of one configured imageboard.
///
/// This is what every [`Post`] keeps as its [`Origin`], so it must never
/// change once the extractor is built.
#[derive(Debug, Clone)]
pub struct ExtractorClient {
    name: String,
    base_url: Url,
    client: Client,
    user_agent: Option<String>,
}

impl ExtractorClient {
    pub fn new(name: &str, base_url: Url, client: Client, user_agent: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            base_url,
            client,
            user_agent,
        }
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }
}

impl Origin for ExtractorClient {
    fn name(&self) -> &str {
        &self.name
    }

    fn http(&self) -> &Client {
        &self.client
    }
}

/// Generic extractor driving any [`SiteApi`].
pub struct PostExtractor<S: SiteApi> {
    origin: Arc<ExtractorClient>,
    api: S,
}

impl<S: SiteApi> PostExtractor<S> {
    pub fn new(client: ExtractorClient, api: S) -> Self {
        Self {
            origin: Arc::new(client),
            api,
        }
    }

    pub const fn api(&self) -> &S {
        &self.api
    }

    pub fn base_url(&self) -> &Url {
        self.origin.base_url()
    }

    fn origin(&self) -> Arc<dyn Origin> {
        self.origin.clone()
    }

    /// This is a separate lower level function to map posts by feeding a
    /// search response obtained through other means.
    pub fn map_posts(&self, raw_json: &str) -> Result<Page, BooruError> {
        let response = serde_json::from_str::<S::PostListResponse>(raw_json)?;
        Ok(self.api.map_post_list_response(response, &self.origin()))
    }

    /// Same as [`map_posts`](Self::map_posts), but for a single post lookup.
    pub fn map_post(&self, raw_json: &str) -> Result<Post, BooruError> {
        let response = serde_json::from_str::<S::SinglePostResponse>(raw_json)?;
        self.api.map_single_post_response(response, &self.origin())
    }

    /// Issues a GET to `url` and returns the body of a successful answer.
    async fn fetch(&self, cancel: &CancellationToken, url: Url) -> Result<String, BooruError> {
        debug!("[{}] GET {url}", self.origin.name);

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("[{}] Request to {url} cancelled", self.origin.name);
                Err(BooruError::Cancelled)
            }
            res = self.send(&url) => res,
        }
    }

    async fn send(&self, url: &Url) -> Result<String, BooruError> {
        let mut request = self.origin.client.get(url.clone());
        if let Some(ua) = self.origin.user_agent() {
            request = request.header(USER_AGENT, ua);
        }

        let response = request.send().await?;
        let status = response.status();

        // A 204 is technically a success, but there is nothing to decode.
        if !status.is_success() || status == StatusCode::NO_CONTENT {
            return Err(HttpError::new(url.as_str(), status.as_u16()).into());
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl<S: SiteApi> Booru for PostExtractor<S> {
    async fn page(
        &self,
        cancel: &CancellationToken,
        query: &Query,
        page: u32,
    ) -> Result<Page, BooruError> {
        let start = Instant::now();
        let url = self.api.posts_url(self.base_url(), query, page);

        let body = self.fetch(cancel, url).await?;
        let page = self.map_posts(&body)?;

        debug!(
            "[{}] Mapped {} posts in {:?}",
            self.origin.name,
            page.posts.len(),
            start.elapsed()
        );

        Ok(page)
    }

    async fn post(&self, cancel: &CancellationToken, id: u64) -> Result<Post, BooruError> {
        let url = self.api.single_post_url(self.base_url(), id);
        let body = self.fetch(cancel, url).await?;
        self.map_post(&body)
    }

    fn http(&self) -> Option<Client> {
        Some(self.origin.client.clone())
    }

    fn name(&self) -> &str {
        &self.origin.name
    }

    fn features(&self) -> BooruFeatures {
        self.api.features()
    }
}
