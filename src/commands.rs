use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use clap::{Parser, ValueEnum};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::core::config::UpdaterConfig;
use crate::core::downloader::{ProgressEvent, ProgressSink, TracingProgress};
use crate::core::runner::{RunOutcome, Updater};

// ─── Command line ───────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "pak-updater",
    about = "Update installed _P.pak mods from the mod registry",
    version
)]
pub struct Cli {
    /// Directory holding the installed `<Name> - V<version>_P.pak` files
    pub mods_dir: PathBuf,

    /// URL of the registry JSON to compare against
    #[arg(long)]
    pub registry_url: String,

    /// Only list outdated mods, do not download anything
    #[arg(long)]
    pub check: bool,

    /// Log progress instead of drawing progress bars
    #[arg(long)]
    pub no_progress: bool,

    /// Log level for this tool (RUST_LOG overrides it). Defaults to `warn`
    /// while progress bars are drawn, `info` otherwise.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

impl Cli {
    pub fn shows_progress_bars(&self) -> bool {
        !self.no_progress && !self.check
    }

    /// Bars and log lines share stderr, so only warnings get through by
    /// default while the bars are up.
    pub fn log_directive(&self) -> &'static str {
        match self.log_level {
            Some(level) => level.to_filter_directive(),
            None if self.shows_progress_bars() => "warn",
            None => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ─── Entry point ────────────────────────────────────────

/// Run the command line and return the process exit code.
pub async fn execute(cli: Cli) -> i32 {
    let mods_dir = match UpdaterConfig::resolve_mods_dir(&cli.mods_dir) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };
    let progress: Arc<dyn ProgressSink> = if cli.shows_progress_bars() {
        Arc::new(TerminalProgress::new())
    } else {
        Arc::new(TracingProgress)
    };
    let config = UpdaterConfig::new(mods_dir, cli.registry_url);

    let updater = match Updater::from_config(config, progress) {
        Ok(updater) => updater,
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };

    if cli.check {
        return check(&updater).await;
    }

    let outcome = updater.run().await;
    print_summary(&outcome);
    outcome.exit_code()
}

async fn check(updater: &Updater) -> i32 {
    match updater.plan().await {
        Ok(plan) if plan.outdated.is_empty() => {
            println!("All {} installed mods are up to date.", plan.installed.len());
            0
        }
        Ok(plan) => {
            println!("{} outdated mods:", plan.outdated.len());
            for entry in &plan.outdated {
                let installed = plan.installed.version_of(&entry.display_name).unwrap_or("?");
                println!("  {}  V{} -> V{}", entry.display_name, installed, entry.version);
            }
            0
        }
        Err(e) => {
            eprintln!("error: {e}");
            1
        }
    }
}

fn print_summary(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::Finished(report) if report.outcomes.is_empty() => {
            println!("All mods are up to date.");
        }
        RunOutcome::Finished(report) => {
            println!(
                "Updated {} of {} mods.",
                report.updated_count(),
                report.outcomes.len()
            );
            for failure in report.failures() {
                if let Some(error) = failure.error() {
                    eprintln!("  failed: {} ({})", failure.task.entry.display_name, error);
                }
            }
        }
        RunOutcome::Aborted(reason) => {
            eprintln!("error: {reason}");
        }
    }
}

// ─── Terminal rendering ─────────────────────────────────

const FILE_TEMPLATE: &str = "  {spinner:.blue} {wide_msg} [{bar:30.cyan/blue}] {bytes}/{total_bytes}";
const SPINNER_TEMPLATE: &str = "  {spinner:.blue} {wide_msg} {bytes}";
const OVERALL_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} mods";

/// Progress bars on stderr: one per download plus an overall bar.
pub struct TerminalProgress {
    multi: MultiProgress,
    overall: Mutex<Option<ProgressBar>>,
    files: Mutex<HashMap<String, ProgressBar>>,
}

impl TerminalProgress {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            overall: Mutex::new(None),
            files: Mutex::new(HashMap::new()),
        }
    }

    fn file_bar(&self, total_bytes: Option<u64>) -> ProgressBar {
        let (bar, template) = match total_bytes {
            Some(total) => (ProgressBar::new(total), FILE_TEMPLATE),
            None => (ProgressBar::new_spinner(), SPINNER_TEMPLATE),
        };
        bar.set_style(style(template));
        self.multi.add(bar)
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .map(|style| style.progress_chars("=>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ProgressSink for TerminalProgress {
    fn on_progress(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::Step { message } => {
                let _ = self.multi.println(format!("==> {message}"));
            }
            ProgressEvent::FileStarted {
                file_name,
                total_bytes,
            } => {
                let bar = self.file_bar(total_bytes);
                bar.set_message(file_name.clone());
                lock(&self.files).insert(file_name, bar);
            }
            ProgressEvent::FileProgress {
                file_name,
                bytes_downloaded,
                ..
            } => {
                if let Some(bar) = lock(&self.files).get(&file_name) {
                    bar.set_position(bytes_downloaded);
                }
            }
            ProgressEvent::FileDone {
                file_name,
                success,
                completed,
                total,
            } => {
                if let Some(bar) = lock(&self.files).remove(&file_name) {
                    if success {
                        bar.finish_with_message(format!("{file_name} (updated)"));
                    } else {
                        bar.abandon_with_message(format!("{file_name} (failed)"));
                    }
                }

                let mut overall = lock(&self.overall);
                let bar = overall.get_or_insert_with(|| {
                    let bar = self.multi.add(ProgressBar::new(total as u64));
                    bar.set_style(style(OVERALL_TEMPLATE));
                    bar
                });
                bar.set_position(completed as u64);
                if completed == total {
                    bar.finish();
                }
            }
        }
    }
}
