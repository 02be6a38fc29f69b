// ─── pak-updater core ───
// Reconciles installed _P.pak mods with the remote registry and downloads
// replacements for the outdated ones.
//
// Architecture:
//   core/
//     installed/  — Mods directory scan + pak filename parser
//     registry/   — Remote catalog model + HTTP client
//     reconcile   — Matching / outdated set logic (pure)
//     downloader/ — Concurrent streamed downloads with progress events
//     join        — fail_fast / wait_all synchronization points
//     runner      — Run controller sequencing one update run
//     config      — Explicit per-run configuration

pub mod config;
pub mod downloader;
pub mod error;
pub mod http;
pub mod installed;
pub mod join;
pub mod reconcile;
pub mod registry;
pub mod runner;

#[cfg(test)]
pub(crate) mod testing;
