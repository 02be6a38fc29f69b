use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info, warn};

use super::fetcher::RemoteFetcher;
use super::progress::{ProgressEvent, ProgressSink};
use super::task::{DownloadOutcome, DownloadStatus, DownloadTask};
use crate::core::error::{UpdaterError, UpdaterResult};
use crate::core::join::wait_all;

/// Concurrent mod downloader.
///
/// Every task runs at once, each one independently: a failure is recorded in
/// that task's outcome and never stops its siblings. There is no retry.
pub struct Downloader {
    fetcher: Arc<dyn RemoteFetcher>,
    progress: Arc<dyn ProgressSink>,
}

impl Downloader {
    pub fn new(fetcher: Arc<dyn RemoteFetcher>, progress: Arc<dyn ProgressSink>) -> Self {
        Self { fetcher, progress }
    }

    // ── Batch ───────────────────────────────────────────

    /// Download every task and wait until all of them have finished.
    ///
    /// Outcomes come back in the same order as `tasks`.
    pub async fn download_all(&self, tasks: Vec<DownloadTask>) -> Vec<DownloadOutcome> {
        let total = tasks.len();
        let completed = AtomicUsize::new(0);
        info!("Starting batch download: {} files", total);

        let outcomes = wait_all(tasks.into_iter().map(|task| {
            let completed = &completed;
            async move {
                let status = match self.download_one(&task).await {
                    Ok(bytes_written) => DownloadStatus::Success { bytes_written },
                    Err(error) => {
                        error!("Failed to update {}: {}", task.entry.display_name, error);
                        DownloadStatus::Failure { error }
                    }
                };

                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                self.progress.on_progress(ProgressEvent::FileDone {
                    file_name: task.file_name.clone(),
                    success: matches!(status, DownloadStatus::Success { .. }),
                    completed: done,
                    total,
                });

                DownloadOutcome { task, status }
            }
        }))
        .await;

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        info!(
            "Batch download finished: {} updated, {} failed",
            total - failed,
            failed
        );
        outcomes
    }

    // ── Single task ─────────────────────────────────────

    /// Probe, stream into `<dest>.part`, then move it over `dest`.
    ///
    /// On any error the partial file is removed and `dest` is left untouched.
    async fn download_one(&self, task: &DownloadTask) -> UpdaterResult<u64> {
        let total_bytes = match self.fetcher.probe_length(task.url()).await {
            Ok(length) => length,
            Err(e) => {
                warn!("{}; progress for {} is indeterminate", e, task.file_name);
                None
            }
        };

        self.progress.on_progress(ProgressEvent::FileStarted {
            file_name: task.file_name.clone(),
            total_bytes,
        });

        let partial = task.partial_path();
        let result = self.stream_to_file(task, total_bytes).await;

        match result {
            Ok(bytes_written) => {
                if let Err(source) = tokio::fs::rename(&partial, &task.dest).await {
                    let _ = tokio::fs::remove_file(&partial).await;
                    return Err(UpdaterError::Write {
                        path: task.dest.clone(),
                        source,
                    });
                }

                debug!("Downloaded: {} -> {:?}", task.url(), task.dest);
                Ok(bytes_written)
            }
            Err(e) => {
                let _ = tokio::fs::remove_file(&partial).await;
                Err(e)
            }
        }
    }

    async fn stream_to_file(
        &self,
        task: &DownloadTask,
        total_bytes: Option<u64>,
    ) -> UpdaterResult<u64> {
        let mut stream = self.fetcher.open(task.url()).await?;

        let partial = task.partial_path();
        let write_error = |source| UpdaterError::Write {
            path: partial.clone(),
            source,
        };

        let mut file = tokio::fs::File::create(&partial)
            .await
            .map_err(write_error)?;

        let mut downloaded: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await.map_err(write_error)?;

            downloaded += chunk.len() as u64;
            self.progress.on_progress(ProgressEvent::FileProgress {
                file_name: task.file_name.clone(),
                bytes_downloaded: downloaded,
                total_bytes,
            });
        }

        file.flush().await.map_err(write_error)?;
        // Handle must be closed before the rename (Windows).
        drop(file);

        Ok(downloaded)
    }
}
