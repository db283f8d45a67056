use boorumux_common::serde::{self, Deserialize, Serialize};

/// Subset of a post as returned by `/posts.json` and `/posts/<id>.json`.
///
/// Every field is optional: restricted posts come without urls, and older
/// forks of Danbooru leave out several of the counters.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(crate = "self::serde")]
pub struct DanbooruPost {
    pub id: Option<u64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub score: Option<i64>,
    pub source: Option<String>,
    pub rating: Option<String>,
    pub tag_string: Option<String>,
    pub file_ext: Option<String>,
    pub file_size: Option<u64>,
    pub file_url: Option<String>,
    pub image_width: Option<u32>,
    pub image_height: Option<u32>,
    pub preview_file_url: Option<String>,
}
