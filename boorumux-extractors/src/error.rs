use std::fmt::{self, Display};
use std::{io, path::PathBuf};

use thiserror::Error;

/// A non-2xx answer from an imageboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    /// The url that was requested.
    pub url: String,
    /// Status code returned by the server.
    pub code: u16,
}

impl HttpError {
    pub fn new(url: impl Into<String>, code: u16) -> Self {
        Self {
            url: url.into(),
            code,
        }
    }

    /// Human readable meaning of the status code, as booru APIs document them.
    pub const fn reason(&self) -> &'static str {
        match self.code {
            204 => "no content",
            403 => "forbidden",
            404 => "not found",
            420 => "record not saved",
            421 => "user throttled",
            422 => "locked",
            423 => "already exists",
            424 => "invalid parameters",
            500 => "internal server error",
            503 => "unavailable",
            _ => "unknown",
        }
    }
}

impl Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "booru: {} returned status {}: {}",
            self.url,
            self.code,
            self.reason()
        )
    }
}

impl std::error::Error for HttpError {}

/// Enumerates the possible errors that can arise while talking to an imageboard.
#[derive(Error, Debug)]
pub enum BooruError {
    /// The request never got a response: DNS, connection, timeout or body read failure.
    #[error("booru: connection error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The imageboard answered with a non-2xx status.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The imageboard answered with JSON we couldn't understand.
    #[error("booru: failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request succeeded but no post matched.
    #[error("booru: not found")]
    NotFound,

    /// The requested operation doesn't make sense for this source.
    #[error("booru: {operation} is not supported by {source_name}")]
    Unsupported {
        operation: &'static str,
        source_name: String,
    },

    /// The caller, a deadline or a failing sibling request cancelled the call.
    #[error("booru: request cancelled")]
    Cancelled,
}

impl BooruError {
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Status code of the failed request, if the imageboard sent one.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => Some(e.code),
            _ => None,
        }
    }
}

/// Problems found while reading the configuration or building sources from it.
///
/// These are only raised at startup and are never retried.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to access config file {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("Source \"{name}\" has an invalid url: {source}")]
    InvalidUrl {
        name: String,
        source: url::ParseError,
    },

    #[error("Source \"{name}\" is a {kind} source, but {kind} support was not compiled in")]
    KindNotCompiled { name: String, kind: String },

    #[error("Source \"{name}\" uses unsupported url scheme \"{scheme}\"")]
    UnsupportedScheme { name: String, scheme: String },

    #[error("Mux \"{mux}\" combines \"{name}\", which is not a configured source")]
    UnknownSource { mux: String, name: String },

    #[error("Mux \"{mux}\" cannot combine another mux (\"{name}\")")]
    NestedMux { mux: String, name: String },

    #[error("Mux \"{mux}\" doesn't combine any source")]
    EmptyMux { mux: String },

    #[error("Invalid blacklist entry: {message}")]
    InvalidFilter { message: String },

    #[error("Invalid proxy url: {0}")]
    InvalidProxy(reqwest::Error),

    #[error("Failed to build http client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Unable to determine a config directory for this platform")]
    NoConfigDir,
}
