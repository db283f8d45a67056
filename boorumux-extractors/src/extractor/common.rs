use boorumux_common::{
    chrono::{DateTime, TimeZone, Utc},
    log::warn,
    post::zero_time,
};
use url::Url;

/// Appends path segments to `base`, keeping whatever path and query it
/// already had.
///
/// `https://example.test/booru` + `["posts.json"]` gives
/// `https://example.test/booru/posts.json`.
pub fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();

    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }

    url
}

/// Parses an RFC 3339 timestamp, falling back to the zero time.
pub fn parse_rfc3339(raw: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = raw else {
        return zero_time();
    };

    DateTime::parse_from_rfc3339(raw).map_or_else(
        |e| {
            warn!("Failed to parse timestamp {raw:?}: {e}");
            zero_time()
        },
        |t| t.with_timezone(&Utc),
    )
}

/// Parses a timestamp in Ruby's `Date#to_s` layout
/// (`Mon Jan 02 15:04:05 -0700 2006`), falling back to the zero time.
pub fn parse_ruby_date(raw: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = raw else {
        return zero_time();
    };

    DateTime::parse_from_str(raw, "%a %b %d %H:%M:%S %z %Y").map_or_else(
        |e| {
            warn!("Failed to parse timestamp {raw:?}: {e}");
            zero_time()
        },
        |t| t.with_timezone(&Utc),
    )
}

/// Converts seconds since the Unix epoch, falling back to the zero time.
pub fn from_epoch(secs: Option<i64>) -> DateTime<Utc> {
    secs.and_then(|s| Utc.timestamp_opt(s, 0).single())
        .unwrap_or_else(zero_time)
}

/// Splits a space separated tag string. Missing or blank strings give an empty list.
pub fn split_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| s.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}
