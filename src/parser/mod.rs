//! Input validation for YouTube URLs.

mod url;

pub use url::is_youtube_url;
