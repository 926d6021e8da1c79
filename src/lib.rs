//! ytgrab Core Library
//!
//! This library provides the core functionality for the ytgrab tool,
//! which downloads a single YouTube video at a chosen maximum resolution
//! by delegating retrieval to an external download engine (yt-dlp).
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`parser`] - YouTube URL validation
//! - [`download`] - Download request model, engine capability, orchestrator
//! - [`exit`] - Process exit code policy

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod exit;
pub mod parser;

// Re-export commonly used types
pub use download::{
    ConsoleReporter, DEFAULT_RESOLUTION, DownloadError, DownloadRequest, Engine, Outcome,
    ProgressEvent, Reporter, VideoMetadata, YtDlp, run,
};
pub use exit::ProcessExit;
pub use parser::is_youtube_url;
