//! Background reload loop.
//!
//! Merges reload triggers (file changes, SIGHUP) and runs each reload on the
//! blocking pool so file I/O never stalls async tasks.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::service::{MotdService, ReloadOutcome};

/// Window in which bursts of file events collapse into one reload.
pub const DEBOUNCE: Duration = Duration::from_millis(250);

/// Why a reload was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadTrigger {
    FileChange,
    Hangup,
}

/// Reload on every trigger until `shutdown` resolves.
///
/// Returns the number of reloads performed.
pub async fn run_reload_loop<F>(
    service: Arc<MotdService>,
    mut changes: mpsc::UnboundedReceiver<()>,
    mut hangups: mpsc::UnboundedReceiver<()>,
    shutdown: F,
) -> usize
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut reloads = 0;

    loop {
        let trigger = tokio::select! {
            _ = &mut shutdown => break,
            Some(()) = changes.recv() => {
                tokio::select! {
                    _ = &mut shutdown => break,
                    _ = tokio::time::sleep(DEBOUNCE) => {}
                }
                while changes.try_recv().is_ok() {}
                ReloadTrigger::FileChange
            }
            Some(()) = hangups.recv() => ReloadTrigger::Hangup,
            else => break,
        };

        let svc = service.clone();
        match tokio::task::spawn_blocking(move || svc.reload()).await {
            Ok(outcome) => {
                reloads += 1;
                log_outcome(trigger, &outcome);
            }
            Err(e) => tracing::error!(error = %e, "Reload task failed"),
        }
    }

    tracing::info!(reloads, "Reload loop stopped");
    reloads
}

fn log_outcome(trigger: ReloadTrigger, outcome: &ReloadOutcome) {
    match outcome {
        ReloadOutcome::Loaded { hosts } => {
            tracing::info!(?trigger, hosts, "Reload complete")
        }
        ReloadOutcome::Defaulted => tracing::info!(?trigger, "Reload complete, no config"),
        ReloadOutcome::Failed(e) => tracing::warn!(?trigger, error = %e, "Reload rejected"),
    }
}
