//! Download request model and derived engine parameters.

use std::path::{Path, PathBuf};

/// Default maximum video height when `--resolution` is omitted.
pub const DEFAULT_RESOLUTION: u32 = 720;

/// A single download request: one URL, one destination directory, one
/// resolution ceiling. Constructed once from CLI input and consumed once
/// by the engine; there is no state beyond the process invocation.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    /// Validated YouTube watch/short-link URL.
    pub url: String,
    /// Destination directory, created (with parents) if absent.
    pub output_path: PathBuf,
    /// Maximum stream height in pixels.
    pub resolution: u32,
}

impl DownloadRequest {
    /// Creates a request for `url` written under `output_path`.
    pub fn new(url: impl Into<String>, output_path: impl Into<PathBuf>, resolution: u32) -> Self {
        Self {
            url: url.into(),
            output_path: output_path.into(),
            resolution,
        }
    }

    /// Engine format filter: best available MP4 stream at or below the
    /// requested height.
    #[must_use]
    pub fn format_filter(&self) -> String {
        format!("best[ext=mp4][height<={}]", self.resolution)
    }

    /// Engine output template: `<output_path>/<title>.<extension>`, where
    /// title and extension are filled in by the engine from video metadata.
    #[must_use]
    pub fn output_template(&self) -> PathBuf {
        self.output_path.join("%(title)s.%(ext)s")
    }

    /// Destination path for a probed title/extension pair.
    ///
    /// The title goes through the same character replacement yt-dlp applies
    /// when expanding `%(title)s`, so this path matches the file the engine
    /// actually writes.
    #[must_use]
    pub fn destination(&self, title: &str, ext: &str) -> PathBuf {
        self.output_path
            .join(format!("{}.{ext}", sanitize_title(title)))
    }

    /// Absolute form of the output directory, for user-facing messages.
    /// Falls back to the configured path when it does not exist yet.
    #[must_use]
    pub fn display_output_path(&self) -> PathBuf {
        self.output_path
            .canonicalize()
            .unwrap_or_else(|_| self.output_path.clone())
    }
}

impl Default for DownloadRequest {
    fn default() -> Self {
        Self::new(String::new(), Path::new("."), DEFAULT_RESOLUTION)
    }
}

/// Replicates yt-dlp's default filename sanitization for `%(title)s`.
///
/// Path separators become big solidus lookalikes (`/` → `⧸`, `\` → `⧹`),
/// the remaining Windows-unsafe characters (`"*:<>?|`) become their
/// fullwidth counterparts, newlines become spaces, and other control
/// characters are dropped. An empty result falls back to `_`.
fn sanitize_title(title: &str) -> String {
    let mut sanitized: String = title
        .chars()
        .filter_map(|c| match c {
            '/' => Some('\u{29F8}'),
            '\\' => Some('\u{29F9}'),
            '"' | '*' | ':' | '<' | '>' | '?' | '|' => char::from_u32(c as u32 + 0xFEE0),
            '\n' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect();
    if sanitized.is_empty() {
        sanitized.push('_');
    }
    sanitized
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_filter_uses_resolution_ceiling() {
        let request = DownloadRequest::new(
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "./out",
            480,
        );
        assert_eq!(request.format_filter(), "best[ext=mp4][height<=480]");
    }

    #[test]
    fn test_format_filter_default_resolution() {
        let request = DownloadRequest::new("https://youtu.be/dQw4w9WgXcQ", ".", DEFAULT_RESOLUTION);
        assert_eq!(request.format_filter(), "best[ext=mp4][height<=720]");
    }

    #[test]
    fn test_default_resolution_is_720() {
        assert_eq!(DEFAULT_RESOLUTION, 720);
    }

    #[test]
    fn test_output_template_joins_output_path() {
        let request = DownloadRequest::new("https://youtu.be/dQw4w9WgXcQ", "./videos", 720);
        assert_eq!(
            request.output_template(),
            PathBuf::from("./videos/%(title)s.%(ext)s")
        );
    }

    #[test]
    fn test_destination_joins_title_and_extension() {
        let request = DownloadRequest::new("https://youtu.be/dQw4w9WgXcQ", "/tmp/v", 720);
        assert_eq!(
            request.destination("Never Gonna Give You Up", "mp4"),
            PathBuf::from("/tmp/v/Never Gonna Give You Up.mp4")
        );
    }

    #[test]
    fn test_destination_sanitizes_slash_like_the_engine() {
        let request = DownloadRequest::new("https://youtu.be/dQw4w9WgXcQ", "/tmp/v", 720);
        // The slash must not create a subdirectory in the computed path.
        assert_eq!(
            request.destination("AC/DC - Thunderstruck", "mp4"),
            PathBuf::from("/tmp/v/AC\u{29F8}DC - Thunderstruck.mp4")
        );
    }

    #[test]
    fn test_sanitize_title_replaces_windows_unsafe_characters() {
        assert_eq!(
            sanitize_title(r#"What? "Quoted": A|B*C <edit>"#),
            "What\u{FF1F} \u{FF02}Quoted\u{FF02}\u{FF1A} A\u{FF5C}B\u{FF0A}C \u{FF1C}edit\u{FF1E}"
        );
    }

    #[test]
    fn test_sanitize_title_handles_backslash_newline_and_controls() {
        assert_eq!(sanitize_title("a\\b\nc\td"), "a\u{29F9}b cd");
    }

    #[test]
    fn test_sanitize_title_leaves_plain_titles_alone() {
        assert_eq!(
            sanitize_title("Never Gonna Give You Up"),
            "Never Gonna Give You Up"
        );
    }

    #[test]
    fn test_sanitize_title_empty_falls_back_to_underscore() {
        assert_eq!(sanitize_title(""), "_");
        assert_eq!(sanitize_title("\u{7}"), "_");
    }

    #[test]
    fn test_display_output_path_falls_back_when_missing() {
        let request = DownloadRequest::new("https://youtu.be/dQw4w9WgXcQ", "./no-such-dir", 720);
        assert_eq!(request.display_output_path(), PathBuf::from("./no-such-dir"));
    }
}
