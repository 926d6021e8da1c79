//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use ytgrab::DEFAULT_RESOLUTION;

/// Download a YouTube video at a chosen resolution.
///
/// ytgrab validates the URL, then delegates retrieval to the yt-dlp
/// engine, selecting the best MP4 stream at or below the requested height
/// and writing the file as `<title>.<ext>` inside the output directory.
#[derive(Parser, Debug)]
#[command(name = "ytgrab")]
#[command(author, version, about)]
pub struct Args {
    /// YouTube video URL (watch or youtu.be form)
    #[arg(long)]
    pub url: String,

    /// Maximum video height in pixels (e.g. 480, 720, 1080)
    #[arg(long, default_value_t = DEFAULT_RESOLUTION, value_parser = clap::value_parser!(u32).range(1..=4320))]
    pub resolution: u32,

    /// Output directory, created if missing (default: current folder)
    #[arg(long = "output_path", alias = "output-path", default_value = ".")]
    pub output_path: PathBuf,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
