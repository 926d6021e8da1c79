//! Exit code logic for the ytgrab process.
//!
//! Single responsibility: map run outcomes and errors to the process exit
//! outcome. Failures are reported to the user as printed text AND as a
//! non-zero exit code, so scripts can distinguish them from success.

use crate::download::DownloadError;

/// Process exit outcome for one download run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessExit {
    /// Download completed, or the file was already present.
    Success,
    /// The engine, filesystem, or metadata probe failed.
    DownloadFailure,
    /// The input URL was rejected before any engine call.
    InvalidInput,
}

impl ProcessExit {
    /// Numeric exit code for the OS.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::DownloadFailure => 1,
            Self::InvalidInput => 2,
        }
    }

    /// Classifies a download error into an exit outcome.
    #[must_use]
    pub fn from_error(error: &DownloadError) -> Self {
        match error {
            DownloadError::InvalidUrl { .. } => Self::InvalidInput,
            _ => Self::DownloadFailure,
        }
    }
}
