//! Configuration loading from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::schema::{
    resolve_document, ConfigDocument, HostMap, CONFIG_FILE_NAME, DEFAULT_DOCUMENT,
};

/// Errors that can occur while loading `config.json`.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The data directory could not be created.
    #[error("failed to create data directory {}: {source}", .path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The default configuration file could not be written.
    #[error("failed to create default config {}: {source}", .path.display())]
    FileCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file exists but could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document is malformed or a field has the wrong type.
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::DirectoryCreate { .. } => "directory_create",
            LoadError::FileCreate { .. } => "file_create",
            LoadError::Read { .. } => "read",
            LoadError::Parse { .. } => "parse",
        }
    }
}

/// Where a loaded mapping came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from an existing file.
    File,
    /// The file was missing and has just been created with an empty object.
    CreatedDefault,
}

/// Result of a successful load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub hosts: HostMap,
    pub source: ConfigSource,
}

impl LoadedConfig {
    /// True when no file existed and defaults are in use.
    pub fn is_default(&self) -> bool {
        self.source == ConfigSource::CreatedDefault
    }
}

/// Reads `<data_dir>/config.json` into a fresh [`HostMap`].
///
/// The loader never touches shared state. Either the whole document parses
/// into a complete mapping or an error is returned.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    data_dir: PathBuf,
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader rooted at the given data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let config_path = data_dir.join(CONFIG_FILE_NAME);
        Self {
            data_dir,
            config_path,
        }
    }

    /// Directory favicon paths are resolved against.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of the configuration document.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load and resolve the configuration document.
    pub fn load(&self) -> Result<LoadedConfig, LoadError> {
        fs::create_dir_all(&self.data_dir).map_err(|source| LoadError::DirectoryCreate {
            path: self.data_dir.clone(),
            source,
        })?;

        if !self.config_path.exists() {
            fs::write(&self.config_path, DEFAULT_DOCUMENT).map_err(|source| {
                LoadError::FileCreate {
                    path: self.config_path.clone(),
                    source,
                }
            })?;
            tracing::debug!(path = %self.config_path.display(), "Created default config");
            return Ok(LoadedConfig {
                hosts: HostMap::new(),
                source: ConfigSource::CreatedDefault,
            });
        }

        let content = fs::read_to_string(&self.config_path).map_err(|source| LoadError::Read {
            path: self.config_path.clone(),
            source,
        })?;
        let document: ConfigDocument =
            serde_json::from_str(&content).map_err(|source| LoadError::Parse {
                path: self.config_path.clone(),
                source,
            })?;

        Ok(LoadedConfig {
            hosts: resolve_document(document, &self.data_dir),
            source: ConfigSource::File,
        })
    }
}
