//! Configuration file watcher for hot reload.

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

/// Monitors `config.json` and emits a notification whenever it changes.
///
/// Only signals; the receiver runs the reload.
pub struct ConfigWatcher {
    path: PathBuf,
    change_tx: mpsc::UnboundedSender<()>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for change notifications.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<()>) {
        let (change_tx, change_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                change_tx,
            },
            change_rx,
        )
    }

    /// Start watching in a background thread.
    ///
    /// Watches the parent directory, filtered to the config file name, so
    /// rename-on-save editors are seen. Events stop when the returned handle
    /// is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.change_tx.clone();
        let path = self.path.clone();
        let file_name = path.file_name().map(|n| n.to_os_string());

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if !(event.kind.is_modify() || event.kind.is_create()) {
                        return;
                    }
                    let touches_config = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                    if touches_config {
                        tracing::info!("Config file change detected");
                        let _ = tx.send(());
                    }
                }
                Err(e) => tracing::error!(error = %e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        let watch_root = self.path.parent().unwrap_or(Path::new("."));
        watcher.watch(watch_root, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %self.path.display(), "Config watcher started");
        Ok(watcher)
    }
}
