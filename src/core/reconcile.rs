// ─── Reconciler ───
// Pure set logic between the registry snapshot and the installed mods.
// Output order always follows the (sorted) registry.

use crate::core::installed::InstalledMods;
use crate::core::registry::RemoteModEntry;

/// Registry entries whose display name is installed locally.
pub fn find_matching(registry: &[RemoteModEntry], installed: &InstalledMods) -> Vec<RemoteModEntry> {
    registry
        .iter()
        .filter(|entry| installed.contains(&entry.display_name))
        .cloned()
        .collect()
}

/// Matched entries whose registry version differs from the installed one.
///
/// Versions are opaque strings: any difference counts, in either direction.
pub fn find_outdated(matching: &[RemoteModEntry], installed: &InstalledMods) -> Vec<RemoteModEntry> {
    matching
        .iter()
        .filter(|entry| installed.version_of(&entry.display_name) != Some(entry.version.as_str()))
        .cloned()
        .collect()
}

/// `find_matching` followed by `find_outdated`.
pub fn outdated_mods(registry: &[RemoteModEntry], installed: &InstalledMods) -> Vec<RemoteModEntry> {
    find_outdated(&find_matching(registry, installed), installed)
}
