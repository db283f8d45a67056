//! # Post Image Module
//!
//! This module defines the [`Image`] struct, which describes one downloadable
//! file attached to a [`Post`](crate::post::Post), and the helpers used to
//! guess a MIME type when an imageboard doesn't report one.

use serde::{Deserialize, Serialize};

/// MIME type assumed for thumbnails. No supported imageboard reports it.
pub const THUMBNAIL_MIME: &str = "image/jpeg";

/// MIME type used when the file extension is missing or unknown.
pub const UNKNOWN_MIME: &str = "application/octet-stream";

/// A single file of a post.
///
/// Numeric fields use `0` when the imageboard didn't tell us the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Direct link to the file. Stays valid for as long as the post exists.
    pub href: String,
    /// MIME type of the file.
    pub mime: String,
    /// File size in bytes.
    pub size: u64,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Image {
    /// Checks whether this file is a video by looking at its MIME type.
    pub fn is_video(&self) -> bool {
        self.mime.starts_with("video/")
    }
}

/// Guesses a MIME type from a bare file extension (without the dot).
///
/// The lookup is case-insensitive and never fails.
///
/// # Examples
/// ```
/// # use boorumux_common::post::image::mime_from_ext;
/// assert_eq!(mime_from_ext("PNG"), "image/png");
/// assert_eq!(mime_from_ext("webm"), "video/webm");
/// assert_eq!(mime_from_ext("nonexistent"), "application/octet-stream");
/// ```
pub fn mime_from_ext(ext: &str) -> String {
    mime_guess::from_ext(ext)
        .first_raw()
        .unwrap_or(UNKNOWN_MIME)
        .to_string()
}

/// Guesses a MIME type from the extension of the last path segment of a url.
pub fn mime_from_url(url: &str) -> String {
    mime_from_ext(&crate::extract_ext_from_url!(url))
}
