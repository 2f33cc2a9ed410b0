use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    // Traversal
    #[error("path not found")]
    NotFound(PathBuf),

    #[error("permission denied")]
    PermissionDenied(PathBuf),

    #[error("recursion depth limit reached")]
    DepthLimit(PathBuf),

    #[error("stat failed")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Config
    #[error("invalid scan path")]
    InvalidPath(String),

    #[error("invalid pattern")]
    InvalidPattern(String),
}

impl ScanError {
    /// The path this error occurred at, if applicable.
    /// Callers use this to present "Skipped: <path>" without pattern matching on variants.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::DepthLimit(p)
            | Self::Stat { path: p, .. }
            | Self::Io { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Whether the scan can continue past this error.
    ///
    /// Recoverable errors (unreadable directories, failed stats, pruned
    /// branches) degrade the scan and are collected into
    /// [`Listing::errors`](crate::Listing) — the walk keeps going.
    ///
    /// Configuration errors (bad path, uncompilable pattern) fail the load
    /// before any traversal starts.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::PermissionDenied(_)
                | Self::DepthLimit(_)
                | Self::Stat { .. }
                | Self::Io { .. }
        )
    }
}
