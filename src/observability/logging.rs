//! Structured logging.
//!
//! Uses the `tracing` crate. The filter comes from `RUST_LOG` when set and
//! falls back to the given default directive otherwise.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "per_host_motd=info";

/// Install the global subscriber. Later calls are ignored.
pub fn init(default_filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
