//! The per-host MOTD service a proxy embeds.
//!
//! # Responsibilities
//! - Own the data directory, registry and responder
//! - Run the reload flow: load → replace, keeping the previous mapping on
//!   failure
//! - Expose the ping hook and the admin command
//!
//! # Design Decisions
//! - No global state; hosts construct and inject a `MotdService`
//! - Load errors are logged and returned as data, never raised on the ping path

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::admin::ReloadCommand;
use crate::config::{ConfigLoader, HostMap, LoadError};
use crate::observability::metrics;
use crate::ping::{
    IconLoader, MarkupRenderer, PingResponder, PingResponse, PlainTextRenderer, PngIconLoader,
};
use crate::registry::MotdRegistry;

/// What a reload attempt did to the registry.
#[derive(Debug)]
pub enum ReloadOutcome {
    /// The file parsed and its mapping is now active.
    Loaded { hosts: usize },
    /// No file existed; a default was written and the registry emptied.
    Defaulted,
    /// The attempt failed; see [`ReloadOutcome::registry_changed`].
    Failed(LoadError),
}

impl ReloadOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, ReloadOutcome::Failed(_))
    }

    /// Whether the active mapping was replaced by this attempt.
    pub fn registry_changed(&self) -> bool {
        match self {
            ReloadOutcome::Loaded { .. } | ReloadOutcome::Defaulted => true,
            ReloadOutcome::Failed(e) => matches!(e, LoadError::FileCreate { .. }),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ReloadOutcome::Loaded { .. } => "loaded",
            ReloadOutcome::Defaulted => "defaulted",
            ReloadOutcome::Failed(e) => e.kind(),
        }
    }
}

/// Per-virtual-host MOTD overrides for a proxy.
pub struct MotdService {
    loader: ConfigLoader,
    registry: Arc<MotdRegistry>,
    responder: PingResponder,
}

impl MotdService {
    /// Create a service with the default text and icon collaborators.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_collaborators(
            data_dir,
            Arc::new(PlainTextRenderer),
            Arc::new(PngIconLoader),
        )
    }

    /// Create a service with host-provided collaborators.
    pub fn with_collaborators(
        data_dir: impl Into<PathBuf>,
        renderer: Arc<dyn MarkupRenderer>,
        icons: Arc<dyn IconLoader>,
    ) -> Self {
        let registry = Arc::new(MotdRegistry::new());
        Self {
            loader: ConfigLoader::new(data_dir),
            responder: PingResponder::new(registry.clone(), renderer, icons),
            registry,
        }
    }

    /// Perform the first load and hand back the admin command.
    pub fn initialize(self: &Arc<Self>) -> ReloadCommand {
        self.reload();
        ReloadCommand::new(self.clone())
    }

    /// Re-read the configuration and install it.
    ///
    /// On parse, read or directory errors the previous mapping stays in
    /// effect. If the default file could not be created the registry is
    /// emptied, since no file means no overrides.
    pub fn reload(&self) -> ReloadOutcome {
        let outcome = match self.loader.load() {
            Ok(loaded) if loaded.is_default() => {
                tracing::warn!(
                    path = %self.loader.config_path().display(),
                    "Config not set, no MOTD data will be passed through"
                );
                self.registry.replace(loaded.hosts);
                ReloadOutcome::Defaulted
            }
            Ok(loaded) => {
                let hosts = loaded.hosts.len();
                self.registry.replace(loaded.hosts);
                tracing::info!(hosts, "Loaded MOTD configuration");
                ReloadOutcome::Loaded { hosts }
            }
            Err(e @ LoadError::FileCreate { .. }) => {
                tracing::error!(error = %e, "Could not create default config, overrides disabled");
                self.registry.replace(HostMap::new());
                ReloadOutcome::Failed(e)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    kept_hosts = self.registry.len(),
                    "Failed to reload MOTD configuration. Keeping current mapping."
                );
                ReloadOutcome::Failed(e)
            }
        };

        metrics::record_reload(outcome.label());
        metrics::set_hosts_configured(self.registry.len());
        outcome
    }

    /// Ping hook: apply the override for `virtual_host`, if any.
    pub fn on_ping(&self, virtual_host: Option<&str>, base: PingResponse) -> PingResponse {
        self.responder.apply(virtual_host, base)
    }

    pub fn registry(&self) -> &Arc<MotdRegistry> {
        &self.registry
    }

    pub fn responder(&self) -> &PingResponder {
        &self.responder
    }

    pub fn data_dir(&self) -> &Path {
        self.loader.data_dir()
    }

    pub fn config_path(&self) -> &Path {
        self.loader.config_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayRecord;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_first_reload_without_file() {
        let tmp = TempDir::new().unwrap();
        let service = MotdService::new(tmp.path().join("motd"));

        let outcome = service.reload();
        assert!(matches!(outcome, ReloadOutcome::Defaulted));
        assert!(outcome.registry_changed());
        assert!(service.registry().is_empty());
        assert_eq!(fs::read_to_string(service.config_path()).unwrap(), "{}");
    }

    #[test]
    fn test_malformed_reload_keeps_previous_mapping() {
        let tmp = TempDir::new().unwrap();
        let service = MotdService::new(tmp.path());
        fs::write(service.config_path(), r#"{"a.example.com": {"description": "X"}}"#).unwrap();
        assert!(matches!(service.reload(), ReloadOutcome::Loaded { hosts: 1 }));

        fs::write(service.config_path(), r#"{"a.example.com": {"description": "#).unwrap();
        let outcome = service.reload();
        assert!(!outcome.is_success());
        assert!(!outcome.registry_changed());

        assert_eq!(
            service.registry().lookup("a.example.com"),
            Some(DisplayRecord {
                description: Some("X".into()),
                favicon_path: None,
            })
        );
    }

    #[test]
    fn test_deleted_file_empties_registry() {
        let tmp = TempDir::new().unwrap();
        let service = MotdService::new(tmp.path());
        fs::write(service.config_path(), r#"{"a.example.com": {"description": "X"}}"#).unwrap();
        service.reload();
        assert_eq!(service.registry().len(), 1);

        fs::remove_file(service.config_path()).unwrap();
        assert!(matches!(service.reload(), ReloadOutcome::Defaulted));
        assert!(service.registry().is_empty());
    }

    fn seeded(data_dir: &Path) -> MotdService {
        let service = MotdService::new(data_dir);
        fs::create_dir_all(data_dir).unwrap();
        fs::write(service.config_path(), r#"{"a.example.com": {"description": "X"}}"#).unwrap();
        assert!(matches!(service.reload(), ReloadOutcome::Loaded { hosts: 1 }));
        service
    }

    #[test]
    fn test_directory_error_keeps_previous_mapping() {
        let tmp = TempDir::new().unwrap();
        let data_dir = tmp.path().join("motd");
        let service = seeded(&data_dir);

        fs::remove_dir_all(&data_dir).unwrap();
        fs::write(&data_dir, "not a directory").unwrap();

        let outcome = service.reload();
        assert!(matches!(
            outcome,
            ReloadOutcome::Failed(LoadError::DirectoryCreate { .. })
        ));
        assert!(!outcome.registry_changed());
        assert!(service.registry().lookup("a.example.com").is_some());
    }

    #[test]
    fn test_read_error_keeps_previous_mapping() {
        let tmp = TempDir::new().unwrap();
        let service = seeded(tmp.path());

        fs::remove_file(service.config_path()).unwrap();
        fs::create_dir(service.config_path()).unwrap();

        let outcome = service.reload();
        assert!(matches!(outcome, ReloadOutcome::Failed(LoadError::Read { .. })));
        assert!(!outcome.registry_changed());
        assert!(service.registry().lookup("a.example.com").is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_create_error_empties_registry() {
        let tmp = TempDir::new().unwrap();
        let service = seeded(tmp.path());

        // Dangling link: the file looks missing but writing through it fails.
        fs::remove_file(service.config_path()).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("gone/config.json"), service.config_path())
            .unwrap();

        let outcome = service.reload();
        assert!(matches!(
            outcome,
            ReloadOutcome::Failed(LoadError::FileCreate { .. })
        ));
        assert!(outcome.registry_changed());
        assert!(service.registry().is_empty());
    }
}
