use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the updater.
/// Every module returns `Result<T, UpdaterError>`.
#[derive(Debug, Error)]
pub enum UpdaterError {
    // ── Startup (fatal) ─────────────────────────────────
    #[error("Registry fetch failed for {url}: {reason}")]
    RegistryFetch { url: String, reason: String },

    #[error("Cannot read mods directory {path:?}: {source}")]
    DirectoryRead {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Per-task ────────────────────────────────────────
    #[error("Size probe failed for {url}: {reason}")]
    Probe { url: String, reason: String },

    #[error("Download failed for {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("Download failed for {url}: HTTP {status}")]
    DownloadStatus { url: String, status: u16 },

    #[error("Write failed at {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Setup ───────────────────────────────────────────
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not a mods directory: {0:?}")]
    InvalidModsDir(PathBuf),
}

/// Convenience alias used throughout the crate.
pub type UpdaterResult<T> = Result<T, UpdaterError>;
