pub mod client;
pub mod fetcher;
pub mod progress;
pub mod task;

pub use client::Downloader;
pub use fetcher::{ByteStream, HttpFetcher, RemoteFetcher};
pub use progress::{ChannelProgress, NoopProgress, ProgressEvent, ProgressSink, TracingProgress};
pub use task::{DownloadOutcome, DownloadStatus, DownloadTask};
