//! Download engine capability and the yt-dlp implementation.
//!
//! The engine owns everything this program does not: network negotiation,
//! format resolution, and file writing. It is modeled as a trait so the
//! orchestrator can be exercised against stubs, with [`YtDlp`] as the
//! production implementation driving the `yt-dlp` binary as a subprocess.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, warn};
use url::Url;

use super::error::DownloadError;
use super::progress::ProgressEvent;
use super::request::DownloadRequest;

/// Progress callback invoked once per engine status tick.
pub type ProgressFn<'a> = &'a (dyn Fn(ProgressEvent) + Send + Sync);

/// Metadata the engine reports for a video before downloading it.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMetadata {
    /// Video title, used as the output filename stem.
    pub title: String,
    /// Container extension the engine will produce.
    pub ext: String,
    /// Duration in seconds, when reported.
    pub duration: Option<f64>,
}

/// External download engine capability.
///
/// Implementations perform the actual media retrieval; the rest of the
/// program only constructs requests and observes progress.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Verifies the engine is usable (binary installed, etc.).
    async fn check_available(&self) -> Result<(), DownloadError>;

    /// Fetches video metadata without downloading anything.
    async fn probe(&self, url: &Url) -> Result<VideoMetadata, DownloadError>;

    /// Downloads the requested video, invoking `on_progress` zero or more
    /// times as the engine reports status.
    async fn download(
        &self,
        request: &DownloadRequest,
        on_progress: ProgressFn<'_>,
    ) -> Result<(), DownloadError>;
}

/// Raw shape of `yt-dlp --dump-json` output (the fields we consume).
#[derive(Debug, Deserialize)]
struct YtDlpMetadata {
    title: String,
    ext: Option<String>,
    duration: Option<f64>,
}

/// Production engine: drives the `yt-dlp` binary.
#[derive(Debug, Default)]
pub struct YtDlp;

impl YtDlp {
    const BINARY: &'static str = "yt-dlp";

    /// Creates a yt-dlp engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn command(&self) -> Command {
        Command::new(Self::BINARY)
    }
}

#[async_trait]
impl Engine for YtDlp {
    async fn check_available(&self) -> Result<(), DownloadError> {
        which::which(Self::BINARY)
            .map(|_| ())
            .map_err(|_| DownloadError::engine_missing(Self::BINARY))
    }

    async fn probe(&self, url: &Url) -> Result<VideoMetadata, DownloadError> {
        let output = self
            .command()
            .arg("--dump-json")
            .arg("--no-download")
            .arg("--no-warnings")
            .arg(url.as_str())
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| DownloadError::io(PathBuf::from(Self::BINARY), e))?;

        if !output.status.success() {
            return Err(DownloadError::engine_failed(failure_message(
                &output.stderr,
                output.status.code(),
            )));
        }

        let meta: YtDlpMetadata = serde_json::from_slice(&output.stdout)
            .map_err(|e| DownloadError::metadata(url.as_str(), e.to_string()))?;

        debug!(title = %meta.title, ext = ?meta.ext, "probed video metadata");

        Ok(VideoMetadata {
            title: meta.title,
            // yt-dlp omits ext for a handful of extractors; mp4 matches the
            // format filter this program always requests.
            ext: meta.ext.unwrap_or_else(|| "mp4".to_string()),
            duration: meta.duration,
        })
    }

    async fn download(
        &self,
        request: &DownloadRequest,
        on_progress: ProgressFn<'_>,
    ) -> Result<(), DownloadError> {
        let mut child = self
            .command()
            .arg("-f")
            .arg(request.format_filter())
            .arg("-o")
            .arg(request.output_template())
            .arg("--quiet")
            .arg("--progress")
            .arg("--newline")
            .arg("--no-warnings")
            .arg(&request.url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| DownloadError::io(PathBuf::from(Self::BINARY), e))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // Stream progress lines while draining stderr, so neither pipe can
        // fill and stall the engine.
        let progress_task = async {
            if let Some(out) = stdout {
                let mut lines = BufReader::new(out).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    if let Some(event) = ProgressEvent::parse(&line) {
                        on_progress(event);
                    }
                }
            }
        };
        let stderr_task = async {
            let mut buf = Vec::new();
            if let Some(mut err) = stderr {
                let _ = err.read_to_end(&mut buf).await;
            }
            buf
        };

        let ((), stderr_bytes) = tokio::join!(progress_task, stderr_task);

        let status = child
            .wait()
            .await
            .map_err(|e| DownloadError::io(PathBuf::from(Self::BINARY), e))?;

        if !status.success() {
            warn!(?status, "engine exited with failure");
            return Err(DownloadError::engine_failed(failure_message(
                &stderr_bytes,
                status.code(),
            )));
        }

        Ok(())
    }
}

/// Distills an engine failure into one human-readable line.
///
/// Prefers the last `ERROR:` line from stderr (yt-dlp's convention), then
/// any non-empty stderr, then the bare exit status.
fn failure_message(stderr: &[u8], code: Option<i32>) -> String {
    let text = String::from_utf8_lossy(stderr);
    let last_error = text
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| line.starts_with("ERROR:"));

    if let Some(line) = last_error {
        return line.to_string();
    }

    let trimmed = text.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    match code {
        Some(code) => format!("engine exited with status {code}"),
        None => "engine terminated by signal".to_string(),
    }
}
