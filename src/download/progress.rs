//! Progress events and user-facing status reporting.
//!
//! The engine emits one status line per tick; this module parses those
//! lines into [`ProgressEvent`]s and renders them for the console. Every
//! payload field is optional and consumers must tolerate absence, so a
//! malformed tick can never crash the process.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// A single progress tick reported by the download engine.
///
/// Fields are best-effort extractions from the engine's status line; any
/// of them may be absent.
#[derive(Debug, Clone, Default)]
pub struct ProgressEvent {
    /// Destination filename, when the engine has announced one.
    pub filename: Option<PathBuf>,
    /// Completion percentage (0.0 to 100.0), when reported.
    pub percent: Option<f32>,
    /// The raw status line the event was parsed from.
    pub line: String,
}

impl ProgressEvent {
    /// Parses a yt-dlp stdout line into a progress event.
    ///
    /// Only `[download]` lines produce events; everything else (playlist
    /// banners, post-processing chatter) returns `None`. Recognized forms:
    ///
    /// - `[download] Destination: <path>` — carries the filename
    /// - `[download]  42.3% of 10.00MiB at 1.20MiB/s ETA 00:05` — percent
    /// - `[download] <path> has already been downloaded` — filename
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let rest = line.strip_prefix("[download]")?.trim();

        let mut event = Self {
            line: line.to_string(),
            ..Self::default()
        };

        if let Some(path) = rest.strip_prefix("Destination:") {
            event.filename = Some(PathBuf::from(path.trim()));
        } else if let Some(path) = rest.strip_suffix("has already been downloaded") {
            event.filename = Some(PathBuf::from(path.trim()));
        } else if let Some(token) = rest.split_whitespace().next()
            && let Some(number) = token.strip_suffix('%')
        {
            event.percent = number.parse::<f32>().ok();
        }

        debug!(?event.filename, ?event.percent, "progress tick");
        Some(event)
    }
}

/// Status reporting seam between the orchestrator and the console.
///
/// Kept as a trait so tests can record what a run would have printed.
pub trait Reporter: Send + Sync {
    /// One download is starting; announces destination and resolution.
    fn started(&self, output_dir: &Path, resolution: u32);

    /// The destination file already exists; nothing will be downloaded.
    fn already_downloaded(&self, path: &Path);

    /// A progress tick arrived from the engine.
    fn progress(&self, event: &ProgressEvent);
}

/// Console reporter: status lines to stdout, ticks drawn as an
/// [`indicatif`] progress bar.
///
/// The bar is created when a download starts; ticks before that point (or
/// ticks without a percentage) are ignored.
#[derive(Default)]
pub struct ConsoleReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ConsoleReporter {
    /// Creates a console reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for ConsoleReporter {
    fn started(&self, output_dir: &Path, resolution: u32) {
        println!(
            "Downloading video to: {} with a resolution of {resolution}p",
            output_dir.display()
        );
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos:>3}%")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(bar);
        }
    }

    fn already_downloaded(&self, _path: &Path) {
        println!(" Already downloaded");
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn progress(&self, event: &ProgressEvent) {
        let Some(percent) = event.percent else {
            return;
        };
        let Ok(slot) = self.bar.lock() else {
            return;
        };
        let Some(bar) = slot.as_ref() else {
            return;
        };
        bar.set_position(percent.clamp(0.0, 100.0).round() as u64);
        if percent >= 100.0 {
            bar.finish();
        }
    }
}
