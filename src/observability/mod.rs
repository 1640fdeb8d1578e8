//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters and gauges)
//!
//! Consumers:
//!     → stdout (fmt layer, filtered by RUST_LOG)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Load failures surface as log lines, never as ping errors
//! - Metrics are cheap (atomic increments) and safe on the ping path

pub mod logging;
pub mod metrics;
