//! The `reloadmotds` administrative command.

use std::sync::Arc;

use crate::service::{MotdService, ReloadOutcome};

/// Something that can run commands: a console, a player, an RCON session.
pub trait CommandSource {
    fn has_permission(&self, permission: &str) -> bool;
    fn send_plain_message(&self, message: &str);
}

/// Result of running the command.
#[derive(Debug)]
pub enum CommandResult {
    /// The source lacked the permission; nothing was reloaded.
    Denied,
    /// A reload was attempted.
    Executed(ReloadOutcome),
}

/// Reloads the MOTD configuration on request.
#[derive(Clone)]
pub struct ReloadCommand {
    service: Arc<MotdService>,
}

impl ReloadCommand {
    pub const NAME: &'static str = "reloadmotds";
    pub const PERMISSION: &'static str = "perservermotds.admin";
    pub const CONFIRMATION: &'static str = "Reloaded MOTD information!";

    pub fn new(service: Arc<MotdService>) -> Self {
        Self { service }
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Whether the source may see and run this command.
    pub fn is_permitted(&self, source: &dyn CommandSource) -> bool {
        source.has_permission(Self::PERMISSION)
    }

    /// Run the command for `source`.
    ///
    /// The confirmation is sent whenever a reload was attempted, whether or
    /// not the new document was accepted; failures are in the log.
    pub fn execute(&self, source: &dyn CommandSource) -> CommandResult {
        if !self.is_permitted(source) {
            tracing::debug!(command = Self::NAME, "Command denied");
            return CommandResult::Denied;
        }

        let outcome = self.service.reload();
        source.send_plain_message(Self::CONFIRMATION);
        CommandResult::Executed(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct RecordingSource {
        permitted: bool,
        messages: Mutex<Vec<String>>,
    }

    impl RecordingSource {
        fn new(permitted: bool) -> Self {
            Self {
                permitted,
                messages: Mutex::new(Vec::new()),
            }
        }
    }

    impl CommandSource for RecordingSource {
        fn has_permission(&self, permission: &str) -> bool {
            self.permitted && permission == ReloadCommand::PERMISSION
        }

        fn send_plain_message(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    fn setup() -> (TempDir, Arc<MotdService>, ReloadCommand) {
        let tmp = TempDir::new().unwrap();
        let service = Arc::new(MotdService::new(tmp.path()));
        let command = service.initialize();
        (tmp, service, command)
    }

    #[test]
    fn test_denied_without_permission() {
        let (_tmp, service, command) = setup();
        fs::write(service.config_path(), r#"{"a": {"description": "A"}}"#).unwrap();

        let source = RecordingSource::new(false);
        assert!(matches!(command.execute(&source), CommandResult::Denied));
        assert!(source.messages.lock().unwrap().is_empty());
        assert!(service.registry().is_empty());
    }

    #[test]
    fn test_reloads_and_confirms() {
        let (_tmp, service, command) = setup();
        assert_eq!(command.name(), "reloadmotds");
        fs::write(service.config_path(), r#"{"a": {"description": "A"}}"#).unwrap();

        let source = RecordingSource::new(true);
        let result = command.execute(&source);
        assert!(matches!(result, CommandResult::Executed(ReloadOutcome::Loaded { hosts: 1 })));
        assert_eq!(*source.messages.lock().unwrap(), vec![ReloadCommand::CONFIRMATION.to_string()]);
        assert!(service.registry().lookup("a").is_some());
    }

    #[test]
    fn test_confirms_even_when_reload_fails() {
        let (_tmp, service, command) = setup();
        fs::write(service.config_path(), "not json").unwrap();

        let source = RecordingSource::new(true);
        let result = command.execute(&source);
        assert!(matches!(result, CommandResult::Executed(ReloadOutcome::Failed(_))));
        assert_eq!(source.messages.lock().unwrap().len(), 1);
    }
}
