use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Everything a progress display needs to know about a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ProgressEvent {
    /// A pipeline stage started.
    Step { message: String },
    /// A download began; `total_bytes` is `None` when the size probe failed.
    FileStarted {
        file_name: String,
        total_bytes: Option<u64>,
    },
    FileProgress {
        file_name: String,
        bytes_downloaded: u64,
        total_bytes: Option<u64>,
    },
    /// A download reached a terminal state. `completed` counts finished tasks
    /// across the whole batch, successes and failures alike.
    FileDone {
        file_name: String,
        success: bool,
        completed: usize,
        total: usize,
    },
}

impl ProgressEvent {
    pub fn step(message: impl Into<String>) -> Self {
        ProgressEvent::Step {
            message: message.into(),
        }
    }
}

/// Observer for progress events. Called from concurrent downloads, so
/// implementations must be cheap and thread-safe.
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, event: ProgressEvent);
}

/// Discards every event.
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn on_progress(&self, _event: ProgressEvent) {}
}

/// Renders progress as log lines.
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn on_progress(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::Step { message } => info!("{}", message),
            ProgressEvent::FileStarted {
                file_name,
                total_bytes,
            } => match total_bytes {
                Some(total) => info!("Downloading {} ({} bytes)", file_name, total),
                None => info!("Downloading {} (size unknown)", file_name),
            },
            ProgressEvent::FileProgress {
                file_name,
                bytes_downloaded,
                total_bytes,
            } => debug!("{}: {}/{:?} bytes", file_name, bytes_downloaded, total_bytes),
            ProgressEvent::FileDone {
                file_name,
                success,
                completed,
                total,
            } => {
                if success {
                    info!("[{}/{}] Updated {}", completed, total, file_name);
                } else {
                    warn!("[{}/{}] Failed {}", completed, total, file_name);
                }
            }
        }
    }
}

/// Forwards events into a channel, for tests and embedding front-ends.
pub struct ChannelProgress {
    tx: mpsc::UnboundedSender<ProgressEvent>,
}

impl ChannelProgress {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ProgressEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ProgressSink for ChannelProgress {
    fn on_progress(&self, event: ProgressEvent) {
        // A dropped receiver just means nobody is listening anymore.
        let _ = self.tx.send(event);
    }
}
