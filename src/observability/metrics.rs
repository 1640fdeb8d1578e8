//! Metrics collection and exposition.
//!
//! # Metrics
//! - `motd_reloads_total` (counter): reload attempts by outcome
//! - `motd_hosts_configured` (gauge): hosts in the active mapping
//! - `motd_ping_overrides_total` (counter): pings that matched a host
//! - `motd_favicon_failures_total` (counter): icons that failed to load
//!
//! Recording is a no-op until a recorder is installed, so library users that
//! never call [`init_metrics`] pay nothing.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record a reload attempt. `outcome` is `loaded`, `defaulted` or an error kind.
pub fn record_reload(outcome: &'static str) {
    ::metrics::counter!("motd_reloads_total", "outcome" => outcome).increment(1);
}

pub fn set_hosts_configured(count: usize) {
    ::metrics::gauge!("motd_hosts_configured").set(count as f64);
}

pub fn record_ping_override() {
    ::metrics::counter!("motd_ping_overrides_total").increment(1);
}

pub fn record_favicon_failure() {
    ::metrics::counter!("motd_favicon_failures_total").increment(1);
}
