//! Configuration file and source construction
//!
//! The configuration is a TOML document listing every source by name:
//! ```toml
//! proxy = "socks5://127.0.0.1:9050"   # optional
//! timeout = 30                         # optional, in seconds
//! user_agent = "boorumux"              # optional
//! blacklist = ["guro", "scat"]         # optional, see the blacklist module
//!
//! [sources.gelbooru]
//! kind = "gelbooru"
//! url = "https://gelbooru.com"
//!
//! [sources.safebooru]
//! kind = "danbooru"
//! url = "https://safebooru.donmai.us"
//!
//! [sources.mux]
//! kind = "mux"
//! combine = ["gelbooru", "safebooru"]
//! ```
//!
//! Everything is validated up front by [`Config::build`], so a source that
//! made it into [`Sources`] can always be used.
use boorumux_common::{
    log::debug,
    reqwest::{Client, Proxy},
    serde::{self, Deserialize, Serialize},
    DEFAULT_USER_AGENT,
};
use std::{collections::BTreeMap, fmt::Display, sync::Arc, time::Duration};
use url::Url;

use crate::blacklist::Blacklist;
use crate::error::ConfigError;
use crate::extractor::{Booru, ExtractorClient};
#[cfg(any(feature = "danbooru", feature = "gelbooru"))]
use crate::extractor::PostExtractor;
use crate::mux::BooruMux;

#[cfg(feature = "danbooru")]
use crate::imageboards::danbooru::DanbooruApi;
#[cfg(feature = "gelbooru")]
use crate::imageboards::gelbooru::GelbooruApi;

pub mod serialize;

/// Every kind of source that can be configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
#[serde(rename_all = "lowercase")]
pub enum BooruKind {
    Danbooru,
    Gelbooru,
    Mux,
}

impl Display for BooruKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Danbooru => write!(f, "danbooru"),
            Self::Gelbooru => write!(f, "gelbooru"),
            Self::Mux => write!(f, "mux"),
        }
    }
}

/// One entry of the `[sources]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    Danbooru { url: String },
    Gelbooru { url: String },
    /// Searches all the named sources at once.
    Mux { combine: Vec<String> },
}

impl SourceConfig {
    pub const fn kind(&self) -> BooruKind {
        match self {
            Self::Danbooru { .. } => BooruKind::Danbooru,
            Self::Gelbooru { .. } => BooruKind::Gelbooru,
            Self::Mux { .. } => BooruKind::Mux,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct Config {
    /// Proxy for every request, e.g. `socks5://127.0.0.1:9050`.
    pub proxy: Option<String>,
    /// Request timeout in seconds.
    pub timeout: Option<u64>,
    pub user_agent: Option<String>,
    /// Raw blacklist, in any of the forms accepted by [`Blacklist::from_value`].
    pub blacklist: Option<toml::Value>,
    #[serde(default)]
    pub sources: BTreeMap<String, SourceConfig>,
}

/// Everything built out of a [`Config`].
pub struct Sources {
    boorus: BTreeMap<String, Arc<dyn Booru>>,
    blacklist: Blacklist,
}

impl Sources {
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Booru>> {
        self.boorus.get(name)
    }

    /// All sources, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Booru>)> {
        self.boorus.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.boorus.keys().map(String::as_str)
    }

    pub const fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    pub fn len(&self) -> usize {
        self.boorus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boorus.is_empty()
    }
}

impl Config {
    /// Parses a configuration document.
    ///
    /// # Errors
    /// Fails on invalid TOML, unknown source kinds and sources missing their
    /// `url` or `combine` keys.
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        debug!("Config decoded with {} sources", config.sources.len());
        Ok(config)
    }

    /// Builds the shared http client along with every configured source.
    ///
    /// All sources share the same [`Client`], so they also share its
    /// connection pool. Muxes can only combine sources that talk to an
    /// imageboard directly.
    ///
    /// # Errors
    /// Fails on the first invalid url, proxy, blacklist entry or mux member.
    pub fn build(&self) -> Result<Sources, ConfigError> {
        let client = self.http_client()?;
        let user_agent = self
            .user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let mut boorus: BTreeMap<String, Arc<dyn Booru>> = BTreeMap::new();

        for (name, source) in &self.sources {
            let url = match source {
                SourceConfig::Danbooru { url } | SourceConfig::Gelbooru { url } => {
                    validate_url(name, url)?
                }
                SourceConfig::Mux { .. } => continue,
            };

            let booru = new_extractor(
                source.kind(),
                ExtractorClient::new(name, url, client.clone(), Some(user_agent.clone())),
            )
            .ok_or_else(|| ConfigError::KindNotCompiled {
                name: name.clone(),
                kind: source.kind().to_string(),
            })?;

            debug!("Configured {} source {name}", source.kind());
            boorus.insert(name.clone(), booru);
        }

        let mut muxes = Vec::new();

        for (name, source) in &self.sources {
            let SourceConfig::Mux { combine } = source else {
                continue;
            };

            if combine.is_empty() {
                return Err(ConfigError::EmptyMux { mux: name.clone() });
            }

            let mut members = Vec::with_capacity(combine.len());

            for member in combine {
                match (boorus.get(member), self.sources.get(member)) {
                    (Some(booru), _) => members.push(booru.clone()),
                    (None, Some(SourceConfig::Mux { .. })) => {
                        return Err(ConfigError::NestedMux {
                            mux: name.clone(),
                            name: member.clone(),
                        })
                    }
                    (None, _) => {
                        return Err(ConfigError::UnknownSource {
                            mux: name.clone(),
                            name: member.clone(),
                        })
                    }
                }
            }

            debug!("Configured mux {name} over {combine:?}");
            muxes.push((name.clone(), Arc::new(BooruMux::new(name, members))));
        }

        for (name, mux) in muxes {
            boorus.insert(name, mux);
        }

        let blacklist = match &self.blacklist {
            Some(value) => Blacklist::from_value(value)?,
            None => Blacklist::default(),
        };

        Ok(Sources { boorus, blacklist })
    }

    fn http_client(&self) -> Result<Client, ConfigError> {
        let mut builder = Client::builder();

        if let Some(proxy) = &self.proxy {
            builder = builder.proxy(Proxy::all(proxy).map_err(ConfigError::InvalidProxy)?);
        }

        if let Some(secs) = self.timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(builder.build()?)
    }
}

fn validate_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
        name: name.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::UnsupportedScheme {
            name: name.to_string(),
            scheme: scheme.to_string(),
        }),
    }
}

/// Picks the extractor for `kind`. Returns `None` for kinds left out at compile time.
#[allow(unused_variables)]
fn new_extractor(kind: BooruKind, client: ExtractorClient) -> Option<Arc<dyn Booru>> {
    match kind {
        #[cfg(feature = "danbooru")]
        BooruKind::Danbooru => Some(Arc::new(PostExtractor::new(client, DanbooruApi::new()))),
        #[cfg(feature = "gelbooru")]
        BooruKind::Gelbooru => Some(Arc::new(PostExtractor::new(client, GelbooruApi::new()))),
        _ => None,
    }
}
