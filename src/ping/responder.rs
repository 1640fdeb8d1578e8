//! Merges a registry entry into an outbound ping response.
//!
//! # Responsibilities
//! - Resolve the virtual host against the registry
//! - Override description and favicon only when the record sets them
//! - Pass every other field through untouched
//!
//! # Design Decisions
//! - Never fails: a broken icon keeps the base favicon and logs a warning
//! - Reads one registry snapshot per ping

use std::sync::Arc;

use crate::config::DisplayRecord;
use crate::observability::metrics;
use crate::ping::collaborators::{IconLoader, MarkupRenderer};
use crate::ping::response::PingResponse;
use crate::registry::MotdRegistry;

/// Applies per-host overrides to ping responses.
#[derive(Clone)]
pub struct PingResponder {
    registry: Arc<MotdRegistry>,
    renderer: Arc<dyn MarkupRenderer>,
    icons: Arc<dyn IconLoader>,
}

impl PingResponder {
    pub fn new(
        registry: Arc<MotdRegistry>,
        renderer: Arc<dyn MarkupRenderer>,
        icons: Arc<dyn IconLoader>,
    ) -> Self {
        Self {
            registry,
            renderer,
            icons,
        }
    }

    /// Produce the response for a ping that arrived on `virtual_host`.
    pub fn apply(&self, virtual_host: Option<&str>, base: PingResponse) -> PingResponse {
        let Some(host) = virtual_host else {
            return base;
        };
        let Some(record) = self.registry.lookup(host) else {
            tracing::trace!(host = %host, "No MOTD override");
            return base;
        };

        let mut ping = base;
        if self.merge(host, &record, &mut ping) {
            metrics::record_ping_override();
            tracing::debug!(host = %host, "Applied MOTD override");
        }
        ping
    }

    /// Copy the record's fields onto `ping`. Returns whether anything changed.
    fn merge(&self, host: &str, record: &DisplayRecord, ping: &mut PingResponse) -> bool {
        let mut changed = false;

        if let Some(raw) = record.description.as_deref() {
            ping.description = self.renderer.render(raw);
            changed = true;
        }

        if let Some(path) = record.favicon_path.as_deref() {
            match self.icons.load(path) {
                Ok(favicon) => {
                    ping.favicon = Some(favicon);
                    changed = true;
                }
                Err(e) => {
                    tracing::warn!(host = %host, error = %e, "Failed to load favicon, keeping base icon");
                    metrics::record_favicon_failure();
                }
            }
        }

        changed
    }
}
