use std::path::Path;

use tracing::debug;

use crate::core::error::{UpdaterError, UpdaterResult};
use crate::core::installed::PARTIAL_SUFFIX;

/// List the entry names of the mods directory.
///
/// Only names are read, never contents. Entries whose name is not valid
/// UTF-8 cannot be mod paks and are skipped, and so are `.part` files an
/// interrupted download left behind.
pub async fn scan_mods_dir(mods_dir: &Path) -> UpdaterResult<Vec<String>> {
    let read_error = |source| UpdaterError::DirectoryRead {
        path: mods_dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(mods_dir).await.map_err(read_error)?;
    let mut file_names = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(read_error)? {
        match entry.file_name().into_string() {
            Ok(name) if name.ends_with(PARTIAL_SUFFIX) => {
                debug!("Skipping unfinished download {:?}", name)
            }
            Ok(name) => file_names.push(name),
            Err(raw) => debug!("Skipping non UTF-8 entry {:?}", raw),
        }
    }

    debug!("Found {} entries in {:?}", file_names.len(), mods_dir);
    Ok(file_names)
}
