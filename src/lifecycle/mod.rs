//! Lifecycle management for the standalone binary.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Init logging → MotdService::reload → start watcher → reload loop
//!
//! Reload (reload.rs):
//!     watcher event | SIGHUP → debounce → spawn_blocking(reload)
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → stop the reload loop
//!     SIGHUP → reload request
//! ```

pub mod reload;
pub mod signals;

pub use reload::{run_reload_loop, ReloadTrigger};
