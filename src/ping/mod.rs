//! Ping response handling subsystem.
//!
//! # Data Flow
//! ```text
//! Ping event (virtual host, base response from the proxy)
//!     → responder.rs (registry lookup)
//!     → collaborators.rs (render markup, load favicon)
//!     → response.rs (mutated PingResponse)
//!     → handed back to the proxy
//! ```

pub mod collaborators;
pub mod responder;
pub mod response;

pub use collaborators::{IconError, IconLoader, MarkupRenderer, PlainTextRenderer, PngIconLoader};
pub use responder::PingResponder;
pub use response::{Component, Favicon, ModEntry, ModInfo, PingResponse, Players, SamplePlayer, Version};
