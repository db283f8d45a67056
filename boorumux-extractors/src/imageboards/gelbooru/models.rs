use std::fmt;

use boorumux_common::serde::{
    self,
    de::{value::MapAccessDeserializer, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};

/// Envelope returned by `index.php?page=dapi&s=post&q=index&json=1`.
///
/// Only a JSON object is accepted. Every field is optional, so the derived
/// decoder would read any array as an empty result.
#[derive(Serialize, Debug, Default)]
#[serde(crate = "self::serde")]
pub struct GelbooruTopLevel {
    #[serde(rename = "@attributes")]
    pub attributes: GelbooruAttributes,
    /// Left out entirely when nothing matched.
    pub post: Vec<GelbooruPost>,
}

#[derive(Deserialize)]
#[serde(crate = "self::serde")]
struct Envelope {
    #[serde(rename = "@attributes", default)]
    attributes: GelbooruAttributes,
    #[serde(default)]
    post: Vec<GelbooruPost>,
}

struct EnvelopeVisitor;

impl<'de> Visitor<'de> for EnvelopeVisitor {
    type Value = GelbooruTopLevel;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a DAPI response object")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        let Envelope { attributes, post } = Envelope::deserialize(MapAccessDeserializer::new(map))?;
        Ok(GelbooruTopLevel { attributes, post })
    }
}

impl<'de> Deserialize<'de> for GelbooruTopLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EnvelopeVisitor)
    }
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(crate = "self::serde")]
pub struct GelbooruAttributes {
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
    /// Total number of matching posts. Newer versions call it `count`.
    #[serde(default, alias = "count")]
    pub total: u64,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(crate = "self::serde")]
pub struct GelbooruPost {
    pub id: Option<u64>,
    pub created_at: Option<String>,
    /// Last update, in seconds since the Unix epoch.
    pub change: Option<i64>,
    pub score: Option<i64>,
    pub source: Option<String>,
    pub rating: Option<String>,
    pub tags: Option<String>,
    pub file_url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub preview_url: Option<String>,
    pub preview_width: Option<u32>,
    pub preview_height: Option<u32>,
}
