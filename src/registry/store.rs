//! Atomically swappable host → display record mapping.

use arc_swap::ArcSwap;
use std::sync::Arc;

use crate::config::{DisplayRecord, HostMap};

/// Holds the active [`HostMap`] behind a single swappable pointer.
///
/// Readers take a lock-free snapshot; `replace` builds nothing in place and
/// only stores a new `Arc`, so a lookup sees either the previous mapping or
/// the new one in full.
#[derive(Debug, Default)]
pub struct MotdRegistry {
    inner: ArcSwap<HostMap>,
}

impl MotdRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with a mapping.
    pub fn with_hosts(hosts: HostMap) -> Self {
        Self {
            inner: ArcSwap::from_pointee(hosts),
        }
    }

    /// Swap in a complete new mapping.
    pub fn replace(&self, hosts: HostMap) {
        let count = hosts.len();
        self.inner.store(Arc::new(hosts));
        tracing::debug!(hosts = count, "Registry replaced");
    }

    /// Exact, case-sensitive lookup. Empty hosts never match.
    pub fn lookup(&self, host: &str) -> Option<DisplayRecord> {
        if host.is_empty() {
            return None;
        }
        self.inner.load().get(host).cloned()
    }

    /// The mapping currently in effect.
    pub fn snapshot(&self) -> Arc<HostMap> {
        self.inner.load_full()
    }

    pub fn len(&self) -> usize {
        self.inner.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.load().is_empty()
    }
}
