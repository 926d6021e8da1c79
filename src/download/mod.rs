//! Download orchestration for a single video.
//!
//! This module owns the one-shot pipeline around the external engine:
//! validate the URL, prepare the output directory, detect an existing
//! destination file, invoke the engine exactly once, and forward its
//! progress ticks to the reporter.
//!
//! # Example
//!
//! ```no_run
//! use ytgrab::download::{ConsoleReporter, DownloadRequest, YtDlp, run};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let request = DownloadRequest::new(
//!     "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
//!     "./videos",
//!     720,
//! );
//! let outcome = run(&YtDlp::new(), &request, &ConsoleReporter::new()).await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

mod engine;
mod error;
mod progress;
mod request;

use std::path::PathBuf;

use tracing::{debug, info};
use url::Url;

use crate::parser::is_youtube_url;

pub use engine::{Engine, ProgressFn, VideoMetadata, YtDlp};
pub use error::DownloadError;
pub use progress::{ConsoleReporter, ProgressEvent, Reporter};
pub use request::{DEFAULT_RESOLUTION, DownloadRequest};

/// How a download run ended (short of an error).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The engine fetched the video to `path`.
    Completed {
        /// Destination file computed from probed metadata.
        path: PathBuf,
    },
    /// The destination file already existed; the engine was not invoked.
    AlreadyDownloaded {
        /// The pre-existing destination file.
        path: PathBuf,
    },
}

/// Runs one download request against an engine.
///
/// The URL is validated before any engine call is made, so an invalid URL
/// never reaches the network. The output directory is created with parents
/// if missing. When the destination file (computed from probed metadata)
/// already exists, the run short-circuits without invoking the engine's
/// download operation.
///
/// # Errors
///
/// Returns [`DownloadError::InvalidUrl`] for non-YouTube input,
/// [`DownloadError::Io`] when the output directory cannot be created, and
/// the engine's own errors for availability, probe, and download failures.
pub async fn run(
    engine: &dyn Engine,
    request: &DownloadRequest,
    reporter: &dyn Reporter,
) -> Result<Outcome, DownloadError> {
    if !is_youtube_url(&request.url) {
        return Err(DownloadError::invalid_url(&request.url));
    }
    // The predicate only admits well-formed http(s) URLs, so this parse is
    // a type conversion, not a second validation.
    let url =
        Url::parse(&request.url).map_err(|_| DownloadError::invalid_url(&request.url))?;

    engine.check_available().await?;

    tokio::fs::create_dir_all(&request.output_path)
        .await
        .map_err(|e| DownloadError::io(&request.output_path, e))?;
    debug!(path = %request.output_path.display(), "output directory ready");

    let metadata = engine.probe(&url).await?;
    let destination = request.destination(&metadata.title, &metadata.ext);

    if destination.exists() {
        info!(path = %destination.display(), "destination already exists, skipping");
        reporter.already_downloaded(&destination);
        return Ok(Outcome::AlreadyDownloaded { path: destination });
    }

    reporter.started(&request.display_output_path(), request.resolution);

    let on_progress = |event: ProgressEvent| reporter.progress(&event);
    engine.download(request, &on_progress).await?;

    info!(path = %destination.display(), "download complete");
    Ok(Outcome::Completed { path: destination })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::Path;
    use std::sync::Mutex;

    use tempfile::TempDir;

    use super::engine::stub::{FailingEngine, StubEngine};
    use super::*;

    const VALID_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

    /// Reporter capturing every line a run would have printed.
    #[derive(Default)]
    struct RecordingReporter {
        lines: Mutex<Vec<String>>,
    }

    impl RecordingReporter {
        fn lines(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }
    }

    impl Reporter for RecordingReporter {
        fn started(&self, output_dir: &Path, resolution: u32) {
            self.lines.lock().unwrap().push(format!(
                "Downloading video to: {} with a resolution of {resolution}p",
                output_dir.display()
            ));
        }

        fn already_downloaded(&self, _path: &Path) {
            self.lines.lock().unwrap().push(" Already downloaded".to_string());
        }

        fn progress(&self, event: &ProgressEvent) {
            if let Some(percent) = event.percent {
                self.lines.lock().unwrap().push(format!(" {percent}%"));
            }
        }
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_url_before_engine() {
        let engine = StubEngine::default();
        let reporter = RecordingReporter::default();
        let request = DownloadRequest::new("https://example.com/nope", ".", 720);

        let result = run(&engine, &request, &reporter).await;

        assert!(matches!(result, Err(DownloadError::InvalidUrl { .. })));
        assert_eq!(engine.download_calls(), 0);
        assert!(reporter.lines().is_empty());
    }

    #[tokio::test]
    async fn test_run_creates_missing_output_directory_with_parents() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a").join("b").join("c");
        let engine = StubEngine::default();
        let reporter = RecordingReporter::default();
        let request = DownloadRequest::new(VALID_URL, &nested, 720);

        run(&engine, &request, &reporter).await.unwrap();

        assert!(nested.is_dir(), "output directory should exist afterwards");
    }

    #[tokio::test]
    async fn test_run_invokes_engine_once_with_format_filter() {
        let tmp = TempDir::new().unwrap();
        let engine = StubEngine::default();
        let reporter = RecordingReporter::default();
        let request = DownloadRequest::new(VALID_URL, tmp.path(), 480);

        let outcome = run(&engine, &request, &reporter).await.unwrap();

        let downloads = engine.downloads.lock().unwrap();
        assert_eq!(downloads.as_slice(), ["best[ext=mp4][height<=480]"]);
        assert!(matches!(outcome, Outcome::Completed { .. }));
    }

    #[tokio::test]
    async fn test_run_reports_start_line_with_destination_and_resolution() {
        let tmp = TempDir::new().unwrap();
        let engine = StubEngine::default();
        let reporter = RecordingReporter::default();
        let request = DownloadRequest::new(VALID_URL, tmp.path(), 1080);

        run(&engine, &request, &reporter).await.unwrap();

        let lines = reporter.lines();
        assert!(
            lines[0].starts_with("Downloading video to: "),
            "first line: {:?}",
            lines.first()
        );
        assert!(lines[0].ends_with("with a resolution of 1080p"));
    }

    #[tokio::test]
    async fn test_run_forwards_progress_ticks() {
        let tmp = TempDir::new().unwrap();
        let engine = StubEngine::default();
        let reporter = RecordingReporter::default();
        let request = DownloadRequest::new(VALID_URL, tmp.path(), 720);

        run(&engine, &request, &reporter).await.unwrap();

        let lines = reporter.lines();
        assert!(lines.iter().any(|l| l == " 50%"), "lines: {lines:?}");
        assert!(lines.iter().any(|l| l == " 100%"), "lines: {lines:?}");
    }

    #[tokio::test]
    async fn test_run_skips_download_when_destination_exists() {
        let tmp = TempDir::new().unwrap();
        let engine = StubEngine::with_metadata("Existing Clip", "mp4");
        std::fs::write(tmp.path().join("Existing Clip.mp4"), b"stale bytes").unwrap();
        let reporter = RecordingReporter::default();
        let request = DownloadRequest::new(VALID_URL, tmp.path(), 720);

        let outcome = run(&engine, &request, &reporter).await.unwrap();

        assert!(matches!(outcome, Outcome::AlreadyDownloaded { .. }));
        assert_eq!(engine.download_calls(), 0, "engine must not be invoked");
        assert_eq!(reporter.lines(), [" Already downloaded"]);
        // The pre-existing file is untouched.
        let contents = std::fs::read(tmp.path().join("Existing Clip.mp4")).unwrap();
        assert_eq!(contents, b"stale bytes");
    }

    #[tokio::test]
    async fn test_run_detects_existing_file_for_sanitized_title() {
        let tmp = TempDir::new().unwrap();
        // The engine writes "AC⧸DC Live.mp4" for this title; the
        // destination check must look for that name, not "AC/DC Live.mp4".
        let engine = StubEngine::with_metadata("AC/DC Live", "mp4");
        std::fs::write(tmp.path().join("AC\u{29F8}DC Live.mp4"), b"stale bytes").unwrap();
        let reporter = RecordingReporter::default();
        let request = DownloadRequest::new(VALID_URL, tmp.path(), 720);

        let outcome = run(&engine, &request, &reporter).await.unwrap();

        assert_eq!(
            outcome,
            Outcome::AlreadyDownloaded {
                path: tmp.path().join("AC\u{29F8}DC Live.mp4")
            }
        );
        assert_eq!(engine.download_calls(), 0);
    }

    #[tokio::test]
    async fn test_run_propagates_engine_failure() {
        let tmp = TempDir::new().unwrap();
        let engine = FailingEngine::new("ERROR: Video unavailable");
        let reporter = RecordingReporter::default();
        let request = DownloadRequest::new(VALID_URL, tmp.path(), 720);

        let err = run(&engine, &request, &reporter).await.unwrap_err();

        assert!(matches!(err, DownloadError::EngineFailed { .. }));
        assert_eq!(err.to_string(), "ERROR: Video unavailable");
    }
}
