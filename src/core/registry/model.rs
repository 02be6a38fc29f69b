use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Deserialize;

/// One mod as published in the registry JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryRecord {
    #[serde(rename = "DisplayName")]
    pub display_name: String,
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "DownloadUrl")]
    pub download_url: String,
}

/// A registry record together with the slug it was published under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteModEntry {
    pub slug: String,
    pub display_name: String,
    pub version: String,
    pub download_url: String,
}

impl RemoteModEntry {
    pub fn new(slug: impl Into<String>, record: RegistryRecord) -> Self {
        Self {
            slug: slug.into(),
            display_name: record.display_name,
            version: record.version,
            download_url: record.download_url,
        }
    }
}

/// Snapshot of the remote catalog, ordered by display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    entries: Vec<RemoteModEntry>,
}

impl Registry {
    /// Normalize the slug-keyed registry map into a sorted sequence.
    pub fn from_records(records: HashMap<String, RegistryRecord>) -> Self {
        Self::from_entries(
            records
                .into_iter()
                .map(|(slug, record)| RemoteModEntry::new(slug, record))
                .collect(),
        )
    }

    pub fn from_entries(mut entries: Vec<RemoteModEntry>) -> Self {
        entries.sort_by(compare_entries);
        Self { entries }
    }

    pub fn entries(&self) -> &[RemoteModEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Human-friendly ordering: case-folded name first, then exact name, then slug
/// so that the order is total and stable across runs.
fn compare_entries(a: &RemoteModEntry, b: &RemoteModEntry) -> Ordering {
    a.display_name
        .to_lowercase()
        .cmp(&b.display_name.to_lowercase())
        .then_with(|| a.display_name.cmp(&b.display_name))
        .then_with(|| a.slug.cmp(&b.slug))
}
