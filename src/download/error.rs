//! Error types for the download module.
//!
//! Structured errors for request validation, engine invocation, and
//! filesystem preparation, with enough context for user-facing messages.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while preparing or running a download.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The provided URL is not a YouTube watch/short-link URL.
    #[error("Invalid YouTube URL")]
    InvalidUrl {
        /// The rejected URL string.
        url: String,
    },

    /// The external download engine binary is not installed on PATH.
    #[error("{binary} not found on PATH")]
    EngineMissing {
        /// Name of the missing engine binary.
        binary: &'static str,
    },

    /// The engine ran but reported a failure (network error, no matching
    /// format, video unavailable, restricted content, etc.).
    #[error("{message}")]
    EngineFailed {
        /// The engine's failure message, as reported on stderr.
        message: String,
    },

    /// The engine's metadata dump could not be parsed.
    #[error("unreadable video metadata for {url}: {message}")]
    Metadata {
        /// The URL being probed.
        url: String,
        /// Parse failure detail.
        message: String,
    },

    /// Filesystem error preparing the output directory or spawning the engine.
    #[error("IO error at {path}: {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a missing-engine error.
    #[must_use]
    pub fn engine_missing(binary: &'static str) -> Self {
        Self::EngineMissing { binary }
    }

    /// Creates an engine failure from the engine's own message.
    pub fn engine_failed(message: impl Into<String>) -> Self {
        Self::EngineFailed {
            message: message.into(),
        }
    }

    /// Creates a metadata parse error.
    pub fn metadata(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Metadata {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// Note on From trait implementations:
// We intentionally do NOT implement `From<std::io::Error>` because the Io
// variant requires a path the source error does not provide. The helper
// constructors are the pattern here as they force callers to supply context.
