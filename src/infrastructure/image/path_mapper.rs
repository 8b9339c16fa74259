//! Maps URLs to flat cache file names.

use crate::domain::entities::ImageSize;

/// Removes every path separator from a URL so it can be used as a single file name.
///
/// URLs that differ only in separators map to the same name.
#[must_use]
pub fn strip_url(url: &str) -> String {
    url.chars().filter(|c| !matches!(c, '/' | '\\')).collect()
}

/// Returns the cache file name for a URL, suffixed with `<width>x<height>` when sized.
#[must_use]
pub fn cache_file_name(url: &str, size: Option<ImageSize>) -> String {
    let mut name = strip_url(url);
    if let Some(size) = size {
        name.push_str(&size.to_string());
    }
    name
}
