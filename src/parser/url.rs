//! YouTube URL validation.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

/// Regex pattern for accepted YouTube URLs.
/// Matches the watch form (`youtube.com/watch?v=<id>`) and the short form
/// (`youtu.be/<id>`), anchored at both ends. The video id is exactly 11
/// characters from the URL-safe class; no trailing path segments or query
/// parameters are permitted.
#[allow(clippy::expect_used)]
static YOUTUBE_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(www\.)?(youtube\.com/watch\?v=|youtu\.be/)[A-Za-z0-9_-]{11}$")
        .expect("YouTube URL regex is valid") // Static pattern, safe to panic
});

/// Returns true iff `url` has the shape of a YouTube watch or short-link URL.
///
/// This predicate is pure and total: it never fails, and anything that is
/// not exactly a watch/short link with an 11-character video id (including
/// the empty string) returns false. No attempt is made to verify that the
/// id refers to an existing video.
///
/// # Examples
///
/// ```
/// use ytgrab::parser::is_youtube_url;
///
/// assert!(is_youtube_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
/// assert!(is_youtube_url("https://youtu.be/dQw4w9WgXcQ"));
/// assert!(!is_youtube_url("https://example.com/watch?v=dQw4w9WgXcQ"));
/// ```
#[must_use]
pub fn is_youtube_url(url: &str) -> bool {
    let matched = YOUTUBE_URL_PATTERN.is_match(url);
    trace!(url, matched, "validated URL candidate");
    matched
}
