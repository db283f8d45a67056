//! General enum for rating posts found on imageboards
//! # Post Rating
//! Most imageboards classify posts by how explicit they are. Every site names
//! these classes a little differently, so they are normalized into four
//! variants, ordered from least to most restrictive:
//! * `General`: Posts that don't involve anything suggestive.
//! * `Questionable`: Posts with some degree of nudity or suggestive elements.
//! * `Sensitive`: Posts that are not explicit but not safe for work either.
//! * `Explicit`: Posts that are explicitly pornographic or otherwise graphic.
//!
//! Parsing a rating never fails. Anything unrecognized is treated as `General`.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::Display;
use std::str::FromStr;

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    #[default]
    General,
    Questionable,
    Sensitive,
    Explicit,
}

impl Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::General => write!(f, "general"),
            Self::Questionable => write!(f, "questionable"),
            Self::Sensitive => write!(f, "sensitive"),
            Self::Explicit => write!(f, "explicit"),
        }
    }
}

impl Rating {
    /// All variants, least restrictive first.
    pub const ALL: [Self; 4] = [
        Self::General,
        Self::Questionable,
        Self::Sensitive,
        Self::Explicit,
    ];

    /// Maps a user-facing rating name to its variant.
    ///
    /// Accepts `general`/`safe`/`g`/`sfw`, `questionable`/`q`,
    /// `sensitive`/`s` and `explicit`/`e`. Anything else is `General`.
    pub fn from_alias(s: &str) -> Self {
        match s {
            "questionable" | "q" => Self::Questionable,
            "sensitive" | "s" => Self::Sensitive,
            "explicit" | "e" => Self::Explicit,
            _ => Self::General,
        }
    }
}

impl FromStr for Rating {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_alias(&s.to_lowercase()))
    }
}

#[cfg(test)]
mod test {
    use super::Rating;

    #[test]
    fn aliases() {
        for name in ["general", "safe", "g", "sfw"] {
            assert_eq!(Rating::from_alias(name), Rating::General);
        }
        assert_eq!(Rating::from_alias("q"), Rating::Questionable);
        assert_eq!(Rating::from_alias("questionable"), Rating::Questionable);
        assert_eq!(Rating::from_alias("s"), Rating::Sensitive);
        assert_eq!(Rating::from_alias("sensitive"), Rating::Sensitive);
        assert_eq!(Rating::from_alias("e"), Rating::Explicit);
        assert_eq!(Rating::from_alias("explicit"), Rating::Explicit);
    }

    #[test]
    fn unknown_is_general() {
        for name in ["", "nsfw", "EXPLICIT ", "x", "rating:e"] {
            assert_eq!(Rating::from_alias(name), Rating::General);
        }
        assert_eq!("Explicit".parse::<Rating>(), Ok(Rating::Explicit));
    }

    #[test]
    fn ordering() {
        let mut sorted = Rating::ALL;
        sorted.sort();
        assert_eq!(sorted, Rating::ALL);
        assert!(Rating::General < Rating::Explicit);
    }

    #[test]
    fn display_roundtrips_through_alias() {
        for r in Rating::ALL {
            assert_eq!(Rating::from_alias(&r.to_string()), r);
        }
    }
}
