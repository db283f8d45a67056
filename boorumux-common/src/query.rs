use serde::{Deserialize, Serialize};

/// A search sent to an imageboard.
///
/// Tags starting with `-` exclude posts carrying that tag. What exactly that
/// means is up to the imageboard, so the tags are passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub tags: Vec<String>,
}

impl Query {
    pub fn new<S>(tags: &[S]) -> Self
    where
        S: ToString,
    {
        Self {
            tags: tags.iter().map(ToString::to_string).collect(),
        }
    }

    /// Builds a query from a space separated tag string, as typed in a search box.
    pub fn parse(input: &str) -> Self {
        Self {
            tags: input.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// The tag list as a single space separated string.
    pub fn tag_string(&self) -> String {
        crate::join_tags!(self.tags)
    }

    /// Tags the results must carry.
    pub fn included(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .map(String::as_str)
            .filter(|t| !t.starts_with('-'))
    }

    /// Tags the results must not carry, without their `-` prefix.
    pub fn excluded(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().filter_map(|t| t.strip_prefix('-'))
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
