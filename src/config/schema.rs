//! Configuration schema definitions.
//!
//! The on-disk document is a JSON object keyed by virtual host. Each value
//! deserializes into a [`HostEntry`], which is then resolved against the data
//! directory into a [`DisplayRecord`].

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// File name of the configuration document inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Body written when the configuration file does not exist yet.
pub const DEFAULT_DOCUMENT: &str = "{}";

/// Mapping from virtual host (exact, case-sensitive) to its display record.
pub type HostMap = HashMap<String, DisplayRecord>;

/// Raw document as it appears on disk.
///
/// `BTreeMap` keeps host order stable for diagnostics; the registry itself
/// uses a `HashMap`.
pub type ConfigDocument = BTreeMap<String, HostEntry>;

/// A single host entry as written in `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HostEntry {
    /// Markup-formatted description.
    #[serde(
        default,
        deserialize_with = "present_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Favicon path, relative to the data directory.
    #[serde(
        default,
        deserialize_with = "present_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub favicon: Option<String>,
}

/// A key that is present must hold a string; `null` is a type error.
/// Missing keys never reach this and fall back to `None`.
fn present_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

/// Per-host override data served by the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayRecord {
    /// Raw markup; `None` leaves the base description in place.
    pub description: Option<String>,

    /// Resolved icon path; `None` leaves the base favicon in place.
    /// Existence is checked only when a ping asks for it.
    pub favicon_path: Option<PathBuf>,
}

impl DisplayRecord {
    /// Resolve a raw entry against the data directory.
    pub fn from_entry(entry: HostEntry, data_dir: &Path) -> Self {
        Self {
            description: entry.description,
            favicon_path: entry.favicon.map(|favicon| data_dir.join(favicon)),
        }
    }

    /// True when the record overrides nothing.
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.favicon_path.is_none()
    }
}

/// Build the registry mapping from a parsed document.
pub fn resolve_document(document: ConfigDocument, data_dir: &Path) -> HostMap {
    document
        .into_iter()
        .map(|(host, entry)| (host, DisplayRecord::from_entry(entry, data_dir)))
        .collect()
}
