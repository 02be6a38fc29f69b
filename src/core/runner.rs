// ─── Run Controller ───
// One update run: snapshot both sides, reconcile, download what is outdated.
//
//   registry fetch ─┐
//                   ├─ fail_fast ─> reconcile ─> Downloader (wait_all) ─> RunOutcome
//   mods dir scan ──┘

use std::sync::Arc;

use tracing::{error, info};

use crate::core::config::UpdaterConfig;
use crate::core::downloader::{
    DownloadOutcome, DownloadTask, Downloader, HttpFetcher, ProgressEvent, ProgressSink,
    RemoteFetcher,
};
use crate::core::error::{UpdaterError, UpdaterResult};
use crate::core::http::build_http_client;
use crate::core::installed::{scan_mods_dir, InstalledMods};
use crate::core::join::fail_fast;
use crate::core::reconcile::outdated_mods;
use crate::core::registry::{HttpRegistry, RegistrySource, RemoteModEntry};

/// What the installed side looks like and which registry entries are ahead of it.
#[derive(Debug, Clone)]
pub struct UpdatePlan {
    pub installed: InstalledMods,
    pub outdated: Vec<RemoteModEntry>,
}

/// Result of a run that got past the startup stage.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outdated: Vec<RemoteModEntry>,
    pub outcomes: Vec<DownloadOutcome>,
}

impl RunReport {
    pub fn updated_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.updated_count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &DownloadOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

/// Terminal state handed back to the caller.
#[derive(Debug)]
pub enum RunOutcome {
    /// Reached even when some or all downloads failed.
    Finished(RunReport),
    /// The registry or the mods directory could not be read.
    Aborted(UpdaterError),
}

impl RunOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Finished(_) => 0,
            RunOutcome::Aborted(_) => 1,
        }
    }
}

pub struct Updater {
    config: UpdaterConfig,
    registry: Arc<dyn RegistrySource>,
    fetcher: Arc<dyn RemoteFetcher>,
    progress: Arc<dyn ProgressSink>,
}

impl Updater {
    pub fn new(
        config: UpdaterConfig,
        registry: Arc<dyn RegistrySource>,
        fetcher: Arc<dyn RemoteFetcher>,
        progress: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            config,
            registry,
            fetcher,
            progress,
        }
    }

    /// Updater talking to the real registry over HTTP.
    pub fn from_config(
        config: UpdaterConfig,
        progress: Arc<dyn ProgressSink>,
    ) -> UpdaterResult<Self> {
        let client = build_http_client()?;
        let registry = Arc::new(HttpRegistry::new(client.clone(), &config.registry_url));
        let fetcher = Arc::new(HttpFetcher::new(client));
        Ok(Self::new(config, registry, fetcher, progress))
    }

    /// Take both snapshots and work out which mods are outdated.
    ///
    /// Nothing is written to the mods directory.
    pub async fn plan(&self) -> UpdaterResult<UpdatePlan> {
        self.step("Fetching registry and scanning installed mods");

        let (registry, installed) = fail_fast(self.registry.fetch_registry(), async {
            let file_names = scan_mods_dir(&self.config.mods_dir).await?;
            Ok::<_, UpdaterError>(InstalledMods::parse(file_names))
        })
        .await?;

        let outdated = outdated_mods(registry.entries(), &installed);
        info!(
            "{} installed mods, {} known to the registry, {} outdated",
            installed.len(),
            registry.len(),
            outdated.len()
        );

        Ok(UpdatePlan {
            installed,
            outdated,
        })
    }

    /// Run the whole pipeline.
    pub async fn run(&self) -> RunOutcome {
        let plan = match self.plan().await {
            Ok(plan) => plan,
            Err(e) => {
                error!("Update aborted: {}", e);
                return RunOutcome::Aborted(e);
            }
        };

        if plan.outdated.is_empty() {
            self.step("All mods are up to date");
            return RunOutcome::Finished(RunReport::default());
        }

        self.step(format!("Updating {} mods", plan.outdated.len()));
        let tasks = DownloadTask::for_entries(plan.outdated.clone(), &self.config.mods_dir);
        let downloader = Downloader::new(self.fetcher.clone(), self.progress.clone());
        let outcomes = downloader.download_all(tasks).await;

        let report = RunReport {
            outdated: plan.outdated,
            outcomes,
        };
        if report.failed_count() > 0 {
            error!(
                "{} of {} mods failed to update",
                report.failed_count(),
                report.outcomes.len()
            );
        }
        RunOutcome::Finished(report)
    }

    fn step(&self, message: impl Into<String>) {
        self.progress.on_progress(ProgressEvent::step(message));
    }
}
