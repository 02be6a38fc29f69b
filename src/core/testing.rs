//! In-memory stand-ins for the network, shared by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::{self, StreamExt};
use tokio::sync::Barrier;

use crate::core::downloader::{ByteStream, RemoteFetcher};
use crate::core::error::{UpdaterError, UpdaterResult};
use crate::core::registry::{Registry, RegistrySource, RemoteModEntry};

pub const REGISTRY_URL: &str = "https://mods.test/registry.json";

pub fn entry(name: &str, version: &str) -> RemoteModEntry {
    RemoteModEntry {
        slug: name.to_lowercase().replace(' ', "-"),
        display_name: name.to_string(),
        version: version.to_string(),
        download_url: format!("https://mods.test/{}.pak", name.replace(' ', "_")),
    }
}

#[derive(Debug, Clone)]
pub enum FakeFile {
    Ok(&'static [u8]),
    /// First half of the body arrives, then the connection drops.
    BrokenStream(&'static [u8]),
    Status(u16),
    /// HEAD fails but GET works.
    ProbeFails(&'static [u8]),
}

#[derive(Default)]
pub struct FakeFetcher {
    files: HashMap<String, FakeFile>,
    opened: Mutex<Vec<String>>,
    gate: Option<Barrier>,
}

impl FakeFetcher {
    pub fn with(mut self, url: &str, file: FakeFile) -> Self {
        self.files.insert(url.to_string(), file);
        self
    }

    /// Every `open` blocks until `parties` of them are waiting at once.
    pub fn gated(mut self, parties: usize) -> Self {
        self.gate = Some(Barrier::new(parties));
        self
    }

    pub fn opened(&self) -> Vec<String> {
        let mut opened = self.opened.lock().unwrap().clone();
        opened.sort();
        opened
    }
}

fn halves(body: &'static [u8]) -> (Bytes, Bytes) {
    let mid = body.len() / 2;
    (
        Bytes::from_static(&body[..mid]),
        Bytes::from_static(&body[mid..]),
    )
}

#[async_trait]
impl RemoteFetcher for FakeFetcher {
    async fn probe_length(&self, url: &str) -> UpdaterResult<Option<u64>> {
        match self.files.get(url) {
            Some(FakeFile::Ok(body)) | Some(FakeFile::BrokenStream(body)) => {
                Ok(Some(body.len() as u64))
            }
            _ => Err(UpdaterError::Probe {
                url: url.to_string(),
                reason: "HTTP 405".into(),
            }),
        }
    }

    async fn open(&self, url: &str) -> UpdaterResult<ByteStream> {
        self.opened.lock().unwrap().push(url.to_string());
        if let Some(gate) = &self.gate {
            gate.wait().await;
        }

        match self.files.get(url) {
            Some(FakeFile::Ok(body)) | Some(FakeFile::ProbeFails(body)) => {
                let (head, tail) = halves(*body);
                Ok(stream::iter(vec![Ok(head), Ok(tail)]).boxed())
            }
            Some(FakeFile::BrokenStream(body)) => {
                let (head, _) = halves(*body);
                let broken = UpdaterError::Download {
                    url: url.to_string(),
                    reason: "connection reset".into(),
                };
                Ok(stream::iter(vec![Ok(head), Err(broken)]).boxed())
            }
            Some(FakeFile::Status(status)) => Err(UpdaterError::DownloadStatus {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(UpdaterError::DownloadStatus {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

pub struct FakeRegistry {
    entries: Option<Vec<RemoteModEntry>>,
    fetches: AtomicUsize,
}

impl FakeRegistry {
    pub fn serving(entries: Vec<RemoteModEntry>) -> Self {
        Self {
            entries: Some(entries),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Registry that answers HTTP 500.
    pub fn broken() -> Self {
        Self {
            entries: None,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RegistrySource for FakeRegistry {
    async fn fetch_registry(&self) -> UpdaterResult<Registry> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match &self.entries {
            Some(entries) => Ok(Registry::from_entries(entries.clone())),
            None => Err(UpdaterError::RegistryFetch {
                url: REGISTRY_URL.into(),
                reason: "HTTP 500".into(),
            }),
        }
    }
}
