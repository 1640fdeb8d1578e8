//! Administrative commands.
//!
//! The host proxy registers [`ReloadCommand`] under its command manager and
//! adapts its own command source type to [`CommandSource`].

pub mod command;

pub use command::{CommandResult, CommandSource, ReloadCommand};
