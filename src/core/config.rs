use std::path::{Path, PathBuf};

use crate::core::error::{UpdaterError, UpdaterResult};

/// Everything one run needs to know about its environment.
#[derive(Debug, Clone)]
pub struct UpdaterConfig {
    /// Directory holding the installed `_P.pak` files. Downloads land here too.
    pub mods_dir: PathBuf,
    /// Registry JSON the installed mods are compared against. There is no
    /// built-in endpoint; the caller always provides one.
    pub registry_url: String,
}

impl UpdaterConfig {
    pub fn new(mods_dir: impl Into<PathBuf>, registry_url: impl Into<String>) -> Self {
        Self {
            mods_dir: mods_dir.into(),
            registry_url: registry_url.into(),
        }
    }

    /// Canonicalize `path` and check that it is an existing directory.
    pub fn resolve_mods_dir(path: &Path) -> UpdaterResult<PathBuf> {
        let resolved = std::fs::canonicalize(path)
            .map_err(|_| UpdaterError::InvalidModsDir(path.to_path_buf()))?;
        if !resolved.is_dir() {
            return Err(UpdaterError::InvalidModsDir(resolved));
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_given_paths() {
        let config = UpdaterConfig::new("/games/mods", "http://localhost:8080/mods.json");
        assert_eq!(config.mods_dir, PathBuf::from("/games/mods"));
        assert_eq!(config.registry_url, "http://localhost:8080/mods.json");
    }

    #[test]
    fn resolve_rejects_missing_and_file_paths() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(
            UpdaterConfig::resolve_mods_dir(&missing),
            Err(UpdaterError::InvalidModsDir(_))
        ));

        let file = dir.path().join("Foo - V1_P.pak");
        std::fs::write(&file, b"pak").unwrap();
        assert!(matches!(
            UpdaterConfig::resolve_mods_dir(&file),
            Err(UpdaterError::InvalidModsDir(_))
        ));

        let resolved = UpdaterConfig::resolve_mods_dir(dir.path()).unwrap();
        assert!(resolved.is_absolute());
    }
}
