//! CLI entry point for the ytgrab tool.

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error, info};
use ytgrab::{ConsoleReporter, DownloadRequest, Outcome, ProcessExit, YtDlp, run};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let request = DownloadRequest::new(args.url, args.output_path, args.resolution);
    let engine = YtDlp::new();
    let reporter = ConsoleReporter::new();

    match run(&engine, &request, &reporter).await {
        Ok(Outcome::Completed { path }) => {
            info!(path = %path.display(), "download complete");
            Ok(())
        }
        Ok(Outcome::AlreadyDownloaded { path }) => {
            info!(path = %path.display(), "nothing to do");
            Ok(())
        }
        Err(e) => {
            // One human-readable line, plus a distinct non-zero exit code
            // so scripts are not told a failed run succeeded.
            println!("Download failed: {e}");
            error!(error = %e, "run failed");
            std::process::exit(ProcessExit::from_error(&e).code());
        }
    }
}
