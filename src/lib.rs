//! Per-virtual-host server list MOTDs for a multi-backend proxy.
//!
//! A hot-reloadable mapping from virtual host to description and favicon,
//! applied to ping responses without passing the ping through to a backend.

pub mod admin;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod ping;
pub mod registry;
pub mod service;

pub use admin::{CommandSource, ReloadCommand};
pub use config::{ConfigLoader, DisplayRecord, HostMap, LoadError};
pub use ping::{PingResponder, PingResponse};
pub use registry::MotdRegistry;
pub use service::{MotdService, ReloadOutcome};
