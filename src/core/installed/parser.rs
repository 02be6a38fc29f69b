use std::collections::HashMap;

/// Separates the mod name from the version part of a pak filename.
pub const NAME_SEPARATOR: &str = " - ";
/// Suffix every mod pak carries.
pub const PAK_SUFFIX: &str = "_P.pak";
/// Version assumed when a filename carries no `V<version>` segment.
pub const DEFAULT_VERSION: &str = "1";
/// Appended to a download target while its body is still streaming.
pub const PARTIAL_SUFFIX: &str = ".part";

/// Installed mods recovered from a directory listing.
///
/// `names` is append-only and keeps duplicates; `versions` holds one entry per
/// name and the last filename in sorted order wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledMods {
    pub names: Vec<String>,
    pub versions: HashMap<String, String>,
}

impl InstalledMods {
    /// Parse a raw directory listing. The listing is sorted first so the
    /// duplicate-name tie-break does not depend on filesystem order.
    pub fn parse<I, S>(file_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sorted: Vec<S> = file_names.into_iter().collect();
        sorted.sort_by(|a, b| a.as_ref().cmp(b.as_ref()));

        let mut installed = Self::default();
        for file_name in &sorted {
            if let Some((name, version)) = parse_file_name(file_name.as_ref()) {
                installed.insert(name, version);
            }
        }
        installed
    }

    fn insert(&mut self, name: String, version: String) {
        self.names.push(name.clone());
        self.versions.insert(name, version);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn version_of(&self, name: &str) -> Option<&str> {
        self.versions.get(name).map(String::as_str)
    }

    /// Number of distinct installed mods.
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

/// Split `"<Name> - V<version>_P.pak"` into `(name, version)`.
///
/// Returns `None` for paks without the separator (game paks, not mods).
pub fn parse_file_name(file_name: &str) -> Option<(String, String)> {
    let (raw_name, rest) = file_name.split_once(NAME_SEPARATOR)?;

    let rest = rest.strip_suffix(PAK_SUFFIX).unwrap_or(rest);
    let version = rest.split('V').nth(1).unwrap_or(DEFAULT_VERSION);

    Some((raw_name.trim().to_string(), version.trim().to_string()))
}

/// Filename a downloaded mod is stored under.
pub fn pak_file_name(display_name: &str, version: &str) -> String {
    format!("{display_name}{NAME_SEPARATOR}V{version} {PAK_SUFFIX}")
}
