//! Post filters
//!
//! # Filters
//! A [`Filter`] is a list of terms that must all hold for a post to match:
//!
//! * `tag` holds when the post carries `tag`.
//! * `a|b|c` holds when the post carries any of `a`, `b` or `c`.
//! * `rating:q|e` holds when the post is rated any of the listed ratings. Any of
//!   the names understood by [`Rating::from_alias`] can be used.
//! * A leading `-` negates the term: `-solo` holds when the post is not tagged `solo`.
//!
//! Tags are compared verbatim, so `long_hair` and `Long_Hair` are different tags.
//!
//! # The Blacklist
//! A [`Blacklist`] is a set of filters. A post is excluded when at least one
//! of them matches it.
//!
//! ## Config file
//! The blacklist lives under the `blacklist` key of the configuration file and
//! can be nested to avoid repeating common terms:
//! ```toml
//! blacklist = [
//!     "guro",                          # one filter per string
//!     "rating:e|q comic",              # terms are separated by spaces
//!     { "rating:e" = ["loli", "scat"] }, # tables prepend their key to every filter inside
//! ]
//! ```
//! The table above is equivalent to `"rating:e loli"` and `"rating:e scat"`.
use ahash::AHashSet;
use boorumux_common::{
    log::{debug, warn},
    post::{rating::Rating, Post},
    tokio::time::Instant,
};

use crate::error::ConfigError;

/// Blacklist used when the configuration file doesn't set one.
pub const DEFAULT_BLACKLIST: [&str; 4] = ["guro", "scat", "furry", "loli"];

/// An AND-chain of optionally negated terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter(pub Vec<String>);

impl Filter {
    /// Splits `raw` on whitespace, one term per word.
    pub fn parse(raw: &str) -> Self {
        Self(raw.split_whitespace().map(str::to_string).collect())
    }

    pub fn terms(&self) -> &[String] {
        &self.0
    }

    /// Checks if every term of this filter holds for `post`.
    ///
    /// A filter without terms matches everything.
    pub fn matches(&self, post: &Post) -> bool {
        self.matches_with(post.rating, |tag| post.has_tag(tag))
    }

    fn matches_with(&self, rating: Rating, has_tag: impl Fn(&str) -> bool) -> bool {
        self.0.iter().all(|term| {
            let (negated, term) = match term.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, term.as_str()),
            };

            let holds = match term.strip_prefix("rating:") {
                Some(ratings) => ratings
                    .split('|')
                    .any(|r| Rating::from_alias(r) == rating),
                None => term.split('|').any(&has_tag),
            };

            holds != negated
        })
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// An OR-set of [`Filter`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blacklist(pub Vec<Filter>);

impl Blacklist {
    pub fn new(filters: Vec<Filter>) -> Self {
        Self(filters)
    }

    /// Checks if any filter matches `post`. An empty blacklist excludes nothing.
    pub fn excludes(&self, post: &Post) -> bool {
        if self.0.is_empty() {
            return false;
        }

        let tags: AHashSet<&str> = post.tags.iter().map(String::as_str).collect();
        self.excludes_with(post.rating, &tags)
    }

    fn excludes_with(&self, rating: Rating, tags: &AHashSet<&str>) -> bool {
        self.0
            .iter()
            .any(|f| f.matches_with(rating, |t| tags.contains(t)))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn filters(&self) -> &[Filter] {
        &self.0
    }

    /// Removes every excluded post from `list`, keeping the order of the rest.
    ///
    /// # Returns
    /// A tuple containing:
    ///  - `u64`: The number of posts removed.
    ///  - `Vec<Post>`: The posts that were kept.
    #[inline]
    #[must_use]
    pub fn filter(&self, list: Vec<Post>) -> (u64, Vec<Post>) {
        if self.0.is_empty() {
            return (0, list);
        }

        let start = Instant::now();
        let mut list = list;
        let original_size = list.len();

        list.retain(|post| {
            let tags: AHashSet<&str> = post.tags.iter().map(String::as_str).collect();
            !self.excludes_with(post.rating, &tags)
        });

        let removed = (original_size - list.len()) as u64;

        debug!("Blacklist removed {removed} posts");
        debug!("Filtering took {:?}", start.elapsed());

        (removed, list)
    }

    /// Builds a blacklist out of the `blacklist` value of the configuration file.
    ///
    /// * A string is a single filter.
    /// * An array contributes the filters of each of its elements.
    /// * A table prepends each key to every filter produced by its value.
    ///
    /// Strings without any term are skipped, since they would match every post.
    ///
    /// # Errors
    /// Fails with [`ConfigError::InvalidFilter`] on anything else (numbers,
    /// booleans, dates).
    pub fn from_value(value: &toml::Value) -> Result<Self, ConfigError> {
        let mut filters = Vec::new();
        collect_filters(value, &[], &mut filters)?;

        debug!("Blacklist set up with {} filters", filters.len());
        Ok(Self(filters))
    }
}

impl Default for Blacklist {
    fn default() -> Self {
        Self(DEFAULT_BLACKLIST.iter().map(|&f| Filter::parse(f)).collect())
    }
}

impl FromIterator<Filter> for Blacklist {
    fn from_iter<T: IntoIterator<Item = Filter>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn collect_filters(
    value: &toml::Value,
    prefix: &[String],
    out: &mut Vec<Filter>,
) -> Result<(), ConfigError> {
    match value {
        toml::Value::String(raw) => {
            let Filter(terms) = Filter::parse(raw);

            if terms.is_empty() && prefix.is_empty() {
                warn!("Skipping empty blacklist filter");
                return Ok(());
            }

            let mut full = prefix.to_vec();
            full.extend(terms);
            out.push(Filter(full));
        }
        toml::Value::Array(items) => {
            for item in items {
                collect_filters(item, prefix, out)?;
            }
        }
        toml::Value::Table(table) => {
            for (base, rest) in table {
                let mut nested = prefix.to_vec();
                nested.extend(base.split_whitespace().map(str::to_string));
                collect_filters(rest, &nested, out)?;
            }
        }
        other => {
            return Err(ConfigError::InvalidFilter {
                message: format!("expected a string, array or table, found {}", other.type_str()),
            });
        }
    }

    Ok(())
}
