//! In-memory MOTD registry.
//!
//! # Data Flow
//! ```text
//! Reload (one writer):
//!     ConfigLoader::load → HostMap built off to the side
//!     → MotdRegistry::replace (single pointer store)
//!
//! Ping (many readers):
//!     MotdRegistry::lookup(host) → Option<DisplayRecord>
//! ```
//!
//! # Design Decisions
//! - No clear-then-refill: the live map is never mutated in place
//! - Readers never block the writer and vice versa
//! - Entries never expire; only `replace` changes visible state

pub mod store;

pub use store::MotdRegistry;
