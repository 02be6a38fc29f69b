pub mod commands;
pub mod core;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::Cli;

pub use crate::core::config::UpdaterConfig;
pub use crate::core::error::{UpdaterError, UpdaterResult};
pub use crate::core::runner::{RunOutcome, RunReport, Updater};

pub fn run() {
    let cli = Cli::parse();

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("warn,pak_updater_lib={}", cli.log_directive()))
        }))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("pak-updater starting for {:?}", cli.mods_dir);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to start async runtime: {e}");
            std::process::exit(1);
        }
    };

    let code = runtime.block_on(commands::execute(cli));
    std::process::exit(code);
}
