//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! <data_dir>/config.json
//!     → loader.rs (create defaults, read, deserialize)
//!     → schema.rs (HostEntry → DisplayRecord, favicon paths resolved)
//!     → HostMap (complete, immutable)
//!     → registry swap (see crate::registry)
//!
//! On reload trigger (admin command, watcher.rs, SIGHUP):
//!     loader.rs loads a fresh HostMap
//!     → success: atomic swap of Arc<HostMap>
//!     → failure: previous mapping stays in place
//! ```
//!
//! # Design Decisions
//! - A load either yields a whole mapping or an error, never a partial one
//! - A missing file is a valid "no overrides" state, not an error
//! - The loader never touches shared state

pub mod loader;
pub mod schema;
pub mod watcher;

pub use loader::{ConfigLoader, ConfigSource, LoadError, LoadedConfig};
pub use schema::{DisplayRecord, HostEntry, HostMap, CONFIG_FILE_NAME};
pub use watcher::ConfigWatcher;
