use std::path::{Path, PathBuf};

use crate::core::error::UpdaterError;
use crate::core::installed::{pak_file_name, PARTIAL_SUFFIX};
use crate::core::registry::RemoteModEntry;

/// One outdated mod to fetch, with the place it will be written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub entry: RemoteModEntry,
    pub file_name: String,
    pub dest: PathBuf,
}

impl DownloadTask {
    pub fn new(entry: RemoteModEntry, mods_dir: &Path) -> Self {
        let file_name = pak_file_name(&entry.display_name, &entry.version);
        let dest = mods_dir.join(&file_name);
        Self {
            entry,
            file_name,
            dest,
        }
    }

    /// Build one task per outdated entry, keeping their order.
    pub fn for_entries(entries: Vec<RemoteModEntry>, mods_dir: &Path) -> Vec<Self> {
        entries
            .into_iter()
            .map(|entry| Self::new(entry, mods_dir))
            .collect()
    }

    pub fn url(&self) -> &str {
        &self.entry.download_url
    }

    /// Sibling path the body is streamed into before the final rename.
    pub fn partial_path(&self) -> PathBuf {
        self.dest.with_file_name(format!("{}{}", self.file_name, PARTIAL_SUFFIX))
    }
}

/// Terminal state of one task.
#[derive(Debug)]
pub enum DownloadStatus {
    Success { bytes_written: u64 },
    Failure { error: UpdaterError },
}

#[derive(Debug)]
pub struct DownloadOutcome {
    pub task: DownloadTask,
    pub status: DownloadStatus,
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, DownloadStatus::Success { .. })
    }

    pub fn error(&self) -> Option<&UpdaterError> {
        match &self.status {
            DownloadStatus::Success { .. } => None,
            DownloadStatus::Failure { error } => Some(error),
        }
    }
}
